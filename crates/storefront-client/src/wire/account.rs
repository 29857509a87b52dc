//! Users, sessions and addresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::types::{Address, AddressInput, Session, User};

use super::{convert_all, timestamp, WireError};

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserDto> for User {
    type Error = WireError;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        if dto.email.trim().is_empty() {
            return Err(WireError(format!("user {} has no email", dto.id)));
        }
        Ok(User {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            role: dto
                .role
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "customer".to_string()),
            created_at: timestamp(dto.created_at),
        })
    }
}

/// `GET /auth/me` → `{user}`.
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: UserDto,
}

/// `POST /auth/login`, `POST /auth/register` → `{message, user, token}`.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserDto,
    #[serde(default)]
    pub token: Option<String>,
}

impl TryFrom<AuthResponse> for Session {
    type Error = WireError;

    fn try_from(response: AuthResponse) -> Result<Self, Self::Error> {
        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| WireError("login response has no token".into()))?;
        Ok(Session {
            user: User::try_from(response.user)?,
            token,
        })
    }
}

// =============================================================================
// Addresses
// =============================================================================

/// `GET /addresses` → `{addresses}`.
#[derive(Debug, Deserialize)]
pub struct AddressListResponse {
    #[serde(default)]
    pub addresses: Option<Vec<AddressDto>>,
}

impl TryFrom<AddressListResponse> for Vec<Address> {
    type Error = WireError;

    fn try_from(response: AddressListResponse) -> Result<Self, Self::Error> {
        convert_all(response.addresses)
    }
}

/// `GET /addresses/:id` → `{address}`.
#[derive(Debug, Deserialize)]
pub struct AddressEnvelope {
    pub address: AddressDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddressDto {
    pub id: u64,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub is_default: bool,
}

impl TryFrom<AddressDto> for Address {
    type Error = WireError;

    fn try_from(dto: AddressDto) -> Result<Self, Self::Error> {
        if dto.id == 0 {
            return Err(WireError("address has no id".into()));
        }
        Ok(Address {
            id: dto.id,
            name: dto.name,
            street: dto.street,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
            country: dto.country,
            phone: dto.phone,
            is_default: dto.is_default,
        })
    }
}

/// `POST /addresses`, `PUT /addresses/:id`.
#[derive(Debug, Serialize)]
pub struct AddressBody<'a> {
    pub name: &'a str,
    pub street: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub postal_code: &'a str,
    pub country: &'a str,
    pub phone: &'a str,
    pub is_default: bool,
}

impl<'a> From<&'a AddressInput> for AddressBody<'a> {
    fn from(input: &'a AddressInput) -> Self {
        AddressBody {
            name: &input.name,
            street: &input.street,
            city: &input.city,
            state: &input.state,
            postal_code: &input.postal_code,
            country: &input.country,
            phone: &input.phone,
            is_default: input.is_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response() {
        let response: AuthResponse = serde_json::from_value(json!({
            "message": "Login successful",
            "user": {
                "id": 1,
                "name": "Jane",
                "email": "jane@example.com",
                "role": "customer",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            },
            "token": "abc.def.ghi"
        }))
        .unwrap();

        let session = Session::try_from(response).unwrap();
        assert_eq!(session.token, "abc.def.ghi");
        assert_eq!(session.user.email, "jane@example.com");
    }

    #[test]
    fn test_login_without_token_is_malformed() {
        let response: AuthResponse = serde_json::from_value(json!({
            "user": {"id": 1, "email": "jane@example.com"}
        }))
        .unwrap();
        assert!(Session::try_from(response).is_err());
    }

    #[test]
    fn test_missing_role_defaults_to_customer() {
        let dto: UserDto = serde_json::from_value(json!({"id": 2, "email": "a@b.co"})).unwrap();
        let user = User::try_from(dto).unwrap();
        assert_eq!(user.role, "customer");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_address_body_field_names() {
        let input = AddressInput {
            name: "Home".into(),
            postal_code: "62701".into(),
            is_default: true,
            ..AddressInput::default()
        };
        let body = serde_json::to_value(AddressBody::from(&input)).unwrap();
        assert_eq!(body["postal_code"], json!("62701"));
        assert_eq!(body["is_default"], json!(true));
    }

    #[test]
    fn test_null_addresses() {
        let response: AddressListResponse =
            serde_json::from_value(json!({"addresses": null})).unwrap();
        assert!(Vec::<Address>::try_from(response).unwrap().is_empty());
    }
}
