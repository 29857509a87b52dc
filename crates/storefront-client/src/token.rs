//! # Token Store
//!
//! Durable home of the bearer credential.
//!
//! ## Storage Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Token Store                                     │
//! │                                                                         │
//! │   get / set / clear / is_valid                                         │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   Option<Arc<dyn TokenStorage>>                                        │
//! │          │                                                              │
//! │   ┌──────┴───────────┬──────────────────────┬───────────────────┐      │
//! │   ▼                  ▼                      ▼                   │      │
//! │  FileStorage       MemoryStorage           None                 │      │
//! │  session.json      Mutex<HashMap>          always empty         │      │
//! │  (key → token)     (tests, one-shot)       (headless)           │      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validity
//! A credential that decodes as a JWT is valid while its `exp` claim lies in
//! the future; an expired one is purged on the spot. A credential that is not
//! a JWT at all is treated as an opaque bearer token and is valid while
//! present. Signatures are never checked here; the backend does that.
//!
//! Storage I/O failures are logged and read as "no credential".

use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, StorageKind};

// =============================================================================
// Storage Trait
// =============================================================================

/// Key/value persistence for the credential.
pub trait TokenStorage: Send + Sync + fmt::Debug {
    fn load(&self, key: &str) -> io::Result<Option<String>>;
    fn store(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// A JSON object of string values in a single file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> io::Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e),
        }
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, contents)
    }
}

impl TokenStorage for FileStorage {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn store(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage poisoned"))
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// =============================================================================
// Claims
// =============================================================================

/// Payload of a JWT credential.
///
/// Each claim is read on its own. A claim with an unexpected shape is
/// dropped without affecting the others, so `exp` is honoured whatever the
/// rest of the payload looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaims {
    /// Expiry as whole seconds since the Unix epoch.
    pub exp: Option<i64>,
    pub user_id: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub roles: Vec<String>,
}

impl TokenClaims {
    /// Reads the claims of a decoded payload. `None` unless it is a JSON object.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let claims = payload.as_object()?;
        let text = |name: &str| claims.get(name).and_then(Value::as_str).map(str::to_string);

        Some(TokenClaims {
            exp: claims.get("exp").and_then(numeric_date),
            user_id: claims.get("user_id").and_then(|id| match id {
                Value::String(s) => s.parse().ok(),
                other => other.as_u64(),
            }),
            email: text("email"),
            role: text("role"),
            roles: match claims.get("roles") {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                Some(Value::String(role)) => vec![role.clone()],
                _ => vec![],
            },
        })
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// NumericDate as integer, fractional or quoted seconds. Fractions round down.
fn numeric_date(value: &Value) -> Option<i64> {
    let seconds = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64))?,
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.floor() as i64)?,
        _ => return None,
    };
    Some(seconds)
}

fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .and_then(|data| TokenClaims::from_payload(&data.claims))
}

/// True when `token` is a JWT whose `exp` lies at or before `now`.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    decode_claims(token).is_some_and(|claims| claims.is_expired(now))
}

// =============================================================================
// Token Store
// =============================================================================

/// Handle to the persisted credential. Cheap to clone; clones share storage.
#[derive(Debug, Clone)]
pub struct TokenStore {
    backend: Option<Arc<dyn TokenStorage>>,
    key: String,
}

impl TokenStore {
    pub fn new(backend: Option<Arc<dyn TokenStorage>>, key: impl Into<String>) -> Self {
        TokenStore {
            backend,
            key: key.into(),
        }
    }

    /// In-memory store under the default key.
    pub fn in_memory() -> Self {
        Self::new(Some(Arc::new(MemoryStorage::new())), "token")
    }

    /// A store with no backend: always empty.
    pub fn headless() -> Self {
        Self::new(None, "token")
    }

    /// Builds the store described by the session settings.
    pub fn from_config(config: &ClientConfig) -> Self {
        let backend: Option<Arc<dyn TokenStorage>> = match config.session.storage {
            StorageKind::File => match config.session_path() {
                Some(path) => Some(Arc::new(FileStorage::new(path))),
                None => {
                    warn!("No data directory for session file; running without session storage");
                    None
                }
            },
            StorageKind::Memory => Some(Arc::new(MemoryStorage::new())),
            StorageKind::None => None,
        };
        Self::new(backend, config.session.key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored credential, if any.
    pub fn get(&self) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.load(&self.key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read session credential");
                None
            }
        }
    }

    pub fn set(&self, token: &str) {
        let Some(backend) = self.backend.as_ref() else {
            debug!("No session storage; credential kept in memory only");
            return;
        };
        if let Err(e) = backend.store(&self.key, token) {
            warn!(error = %e, "Failed to persist session credential");
        }
    }

    pub fn clear(&self) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        if let Err(e) = backend.remove(&self.key) {
            warn!(error = %e, "Failed to clear session credential");
        }
    }

    /// True when a credential is present and not expired.
    ///
    /// An expired credential is cleared as a side effect.
    pub fn is_valid(&self) -> bool {
        self.valid_token().is_some()
    }

    /// The credential when [`TokenStore::is_valid`] holds.
    pub fn valid_token(&self) -> Option<String> {
        let token = self.get()?;
        if is_expired_at(&token, Utc::now().timestamp()) {
            info!("Stored credential has expired; clearing session");
            self.clear();
            return None;
        }
        Some(token)
    }

    /// Decoded claims of the stored credential. `None` for opaque tokens.
    pub fn claims(&self) -> Option<TokenClaims> {
        self.get().as_deref().and_then(decode_claims)
    }

    /// Role hints carried by the credential.
    pub fn roles(&self) -> Vec<String> {
        let Some(claims) = self.claims() else {
            return vec![];
        };
        let mut roles = claims.roles;
        if let Some(role) = claims.role {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        roles
    }

    pub fn is_admin(&self) -> bool {
        self.roles().iter().any(|r| r.eq_ignore_ascii_case("admin"))
    }
}
