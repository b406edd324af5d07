//! # Validation Module
//!
//! Form input validation for the laundry shop.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Types and presence of arguments                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Lengths, formats, ranges                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (employee username)                                        │
//! │  └── Foreign keys (transactions → customers, employees, services)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::id::{parse_id, EntityKind};
use crate::money::Money;
use crate::pricing::Weight;
use crate::types::{NewCustomer, NewEmployee, NewService};
use crate::{MAX_LOAD_GRAMS, MAX_PRICE_PER_KG, MAX_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::required(field));
    }
    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }
    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Person or service name: 1-100 characters after trimming.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    check_length("name", name.trim(), 1, 100)
}

/// Customer address: may be empty, at most 200 characters.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    if address.trim().chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "address".to_string(),
            max: 200,
        });
    }
    Ok(())
}

/// Phone number: 6-20 characters of digits, spaces, `+` and `-`, with at
/// least six digits.
///
/// ```rust
/// use laundry_core::validation::validate_phone_number;
///
/// assert!(validate_phone_number("+62 812-3456-7890").is_ok());
/// assert!(validate_phone_number("call me").is_err());
/// ```
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    check_length("phone_number", phone, 6, 20)?;

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err(ValidationError::invalid(
            "phone_number",
            "must contain only digits, spaces, '+' and '-'",
        ));
    }

    if phone.chars().filter(|c| c.is_ascii_digit()).count() < 6 {
        return Err(ValidationError::invalid("phone_number", "must contain at least 6 digits"));
    }

    Ok(())
}

/// Login name: 3-32 characters of letters, digits, `_` and `.`.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();
    check_length("username", username, 3, 32)?;

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(ValidationError::invalid(
            "username",
            "must contain only letters, numbers, '_' and '.'",
        ));
    }
    Ok(())
}

/// Password: at least 6 characters, not trimmed.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    check_length("password", password, 6, 128)
}

/// Search text. Empty is allowed and means "everything".
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// An ID or name typed where a record is referenced. Unlike a search,
/// blank text is rejected: it would match every row.
///
/// ## Returns
/// The trimmed key.
pub fn validate_lookup_key(field: &str, key: &str) -> ValidationResult<String> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::required(field));
    }
    if key.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_QUERY_LEN,
        });
    }
    Ok(key.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Price per kilogram: more than zero, at most [`MAX_PRICE_PER_KG`].
pub fn validate_price_per_kg(price: Money) -> ValidationResult<()> {
    if price.minor() <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price_per_kg".to_string(),
        });
    }
    if price > MAX_PRICE_PER_KG {
        return Err(ValidationError::OutOfRange {
            field: "price_per_kg (minor units)".to_string(),
            min: 1,
            max: MAX_PRICE_PER_KG.minor(),
        });
    }
    Ok(())
}

/// Load weight: more than zero, at most [`MAX_LOAD_GRAMS`].
pub fn validate_weight(weight: Weight) -> ValidationResult<()> {
    if weight.grams() <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "weight".to_string(),
        });
    }
    if weight.grams() > MAX_LOAD_GRAMS {
        return Err(ValidationError::OutOfRange {
            field: "weight (grams)".to_string(),
            min: 1,
            max: MAX_LOAD_GRAMS,
        });
    }
    Ok(())
}

/// Payment may be zero (pay on pickup is checked by the pricing rules).
pub fn validate_payment(paid: Money) -> ValidationResult<()> {
    if paid.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "paid".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// ID Validators
// =============================================================================

/// Checks an ID is well formed and belongs to `kind`.
pub fn validate_id(id: &str, kind: EntityKind) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    match parse_id(id) {
        Some(parsed) if parsed.kind == kind => Ok(()),
        Some(_) => Err(ValidationError::invalid(
            "id",
            format!("expected an ID-{}-... identifier", kind.prefix()),
        )),
        None => Err(ValidationError::invalid("id", "must look like ID-XX-<n>-<ticks>")),
    }
}

// =============================================================================
// Form Validators
// =============================================================================

pub fn validate_new_customer(form: &NewCustomer) -> ValidationResult<()> {
    validate_name(&form.name)?;
    validate_address(&form.address)?;
    validate_phone_number(&form.phone_number)
}

pub fn validate_new_employee(form: &NewEmployee) -> ValidationResult<()> {
    validate_name(&form.name)?;
    validate_username(&form.username)?;
    validate_password(&form.password)
}

pub fn validate_new_service(form: &NewService) -> ValidationResult<()> {
    validate_name(&form.name)?;
    validate_price_per_kg(form.price_per_kg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Budi Santoso").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("").is_ok());
        assert!(validate_address("Jl. Merdeka 10").is_ok());
        assert!(validate_address(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("081234567890").is_ok());
        assert!(validate_phone_number("+62 812 3456").is_ok());

        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("12345").is_err());
        assert!(validate_phone_number("0812-ABCD-99").is_err());
        assert!(validate_phone_number("+- - - - -").is_err());
        assert!(validate_phone_number(&"1".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("sari.w").is_ok());
        assert!(validate_username("op_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  budi ").unwrap(), "budi");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_lookup_key() {
        assert_eq!(validate_lookup_key("customer", " Budi ").unwrap(), "Budi");
        assert!(matches!(
            validate_lookup_key("customer", "   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_lookup_key("service", "").is_err());
    }

    #[test]
    fn test_validate_numbers() {
        assert!(validate_price_per_kg(Money::from_major(7000)).is_ok());
        assert!(validate_price_per_kg(Money::zero()).is_err());
        assert!(validate_price_per_kg(MAX_PRICE_PER_KG).is_ok());
        assert!(matches!(
            validate_price_per_kg(Money::from_minor(1_000_000_000_000_000)),
            Err(ValidationError::OutOfRange { .. })
        ));

        assert!(validate_weight(Weight::from_grams(2500)).is_ok());
        assert!(validate_weight(Weight::from_grams(0)).is_err());
        assert!(validate_weight(Weight::from_grams(MAX_LOAD_GRAMS + 1)).is_err());

        assert!(validate_payment(Money::zero()).is_ok());
        assert!(validate_payment(Money::from_minor(-1)).is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("ID-CS-1-638400000000000000", EntityKind::Customer).is_ok());
        assert!(validate_id("ID-CS-1-638400000000000000", EntityKind::Service).is_err());
        assert!(validate_id("", EntityKind::Customer).is_err());
        assert!(validate_id("42", EntityKind::Customer).is_err());
    }
}
