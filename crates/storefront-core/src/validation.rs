//! # Validation Module
//!
//! Input checks the views run before dispatching an operation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View (storefront-cli)                                        │
//! │  ├── Argument parsing (clap types)                                     │
//! │  └── THIS MODULE: required fields, ranges, formats                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: REST backend                                                 │
//! │  ├── Authoritative business rules (stock, ownership)                   │
//! │  └── Answers non-2xx → RequestError → slice `error`                    │
//! │                                                                         │
//! │  A rejected local check never reaches the network.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_email, validate_quantity};
//!
//! validate_email("jane@example.com").unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{AddressInput, ProductDraft};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an e-mail address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one '@' with a non-empty local part
/// - Domain contains a '.' that is neither first nor last
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_email;
///
/// assert!(validate_email("jane@example.com").is_ok());
/// assert!(validate_email("jane@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    validate_required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing '@'"))?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("expected name@domain"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }
    match domain.find('.') {
        Some(dot) if dot > 0 && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid("domain must contain a '.'")),
    }
}

/// Validates a password for login or registration.
///
/// ## Rules
/// - Must not be empty
/// - At most 128 characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    if password.chars().count() > 128 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 128,
        });
    }
    Ok(())
}

/// Validates a display name (user, product or category).
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();
    validate_required(field, name)?;
    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }
    Ok(())
}

/// Validates a CSS hex colour such as `#1E90FF` or `#fff`.
pub fn validate_hex_color(hex: &str) -> ValidationResult<()> {
    let digits = hex.strip_prefix('#').ok_or_else(|| ValidationError::InvalidFormat {
        field: "hex".to_string(),
        reason: "must start with '#'".to_string(),
    })?;

    if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidFormat {
            field: "hex".to_string(),
            reason: "expected #RGB or #RRGGBB".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be at least 1 (a zero update is a removal, not an edit)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty < 1 || qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }
    Ok(())
}

/// Validates a price filter range.
///
/// Either bound may be absent. When both are present, `min <= max`.
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::validate_price_range;
///
/// let ten = Money::from_cents(1000);
/// let fifty = Money::from_cents(5000);
/// assert!(validate_price_range(Some(ten), Some(fifty)).is_ok());
/// assert!(validate_price_range(Some(fifty), Some(ten)).is_err());
/// assert!(validate_price_range(None, Some(ten)).is_ok());
/// ```
pub fn validate_price_range(min: Option<Money>, max: Option<Money>) -> ValidationResult<()> {
    for bound in [min, max].into_iter().flatten() {
        if bound.is_negative() {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must not be negative".to_string(),
            });
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ValidationError::InvertedRange {
                field: "price".to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates address fields. Every field except `is_default` is required.
pub fn validate_address(input: &AddressInput) -> ValidationResult<()> {
    validate_required("name", &input.name)?;
    validate_required("street", &input.street)?;
    validate_required("city", &input.city)?;
    validate_required("state", &input.state)?;
    validate_required("postal_code", &input.postal_code)?;
    validate_required("country", &input.country)?;
    validate_required("phone", &input.phone)
}

/// Validates a product draft: a name and a positive price.
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name)?;
    if !draft.price.is_positive() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Discount;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("  jane@example.com ").is_ok());
        assert!(validate_email("janeexample.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane@.com").is_err());
        assert!(validate_email("jane@example.").is_err());
        assert!(validate_email("ja ne@example.com").is_err());
        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_range() {
        let low = Money::from_cents(1000);
        let high = Money::from_cents(5000);
        assert!(validate_price_range(None, None).is_ok());
        assert!(validate_price_range(Some(low), Some(low)).is_ok());
        assert!(matches!(
            validate_price_range(Some(high), Some(low)),
            Err(ValidationError::InvertedRange { .. })
        ));
        assert!(validate_price_range(Some(Money::from_cents(-1)), None).is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#FFFFFF").is_ok());
        assert!(validate_hex_color("#abc").is_ok());
        assert!(validate_hex_color("FFFFFF").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
        assert!(validate_hex_color("#FFFF").is_err());
    }

    #[test]
    fn test_validate_address() {
        let mut input = AddressInput {
            name: "Home".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postal_code: "62701".to_string(),
            country: "US".to_string(),
            phone: "555-0100".to_string(),
            is_default: true,
        };
        assert!(validate_address(&input).is_ok());

        input.phone = "  ".to_string();
        let err = validate_address(&input).unwrap_err();
        assert_eq!(err.to_string(), "phone is required");
    }

    #[test]
    fn test_validate_product_draft() {
        let mut draft = ProductDraft {
            name: "Canvas Tote".to_string(),
            description: String::new(),
            category_id: 3,
            price: Money::from_cents(1999),
            discount: Discount::zero(),
            featured: false,
        };
        assert!(validate_product_draft(&draft).is_ok());

        draft.price = Money::zero();
        assert!(validate_product_draft(&draft).is_err());
    }
}
