//! # Validation Module
//!
//! Input validation for catalog and cart writes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                           │
//! │  ├── Type validation (JSON deserialization)                             │
//! │  └── THIS MODULE: business rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                             │
//! │  ├── NOT NULL constraints                                               │
//! │  ├── UNIQUE (products.code, users.username)                             │
//! │  └── Foreign key constraints                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cost codes are deliberately not validated here: an undecodable code is
//! stored as given and simply leaves the cost price unknown.
//!
//! ## Usage
//! ```rust
//! use mtc_core::validation::{validate_product_code, validate_quantity};
//!
//! validate_product_code("TS-001").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::NewProduct;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_CODE_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens and underscores
///
/// ## Example
/// ```rust
/// use mtc_core::validation::validate_product_code;
///
/// assert!(validate_product_code("TS-001").is_ok());
/// assert!(validate_product_code("").is_err());
/// assert!(validate_product_code("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a required display name (product, category, brand).
///
/// ## Example
/// ```rust
/// use mtc_core::validation::validate_name;
///
/// assert!(validate_name("brand", "Levi's").is_ok());
/// assert!(validate_name("brand", "  ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a search keyword and returns it trimmed.
///
/// Empty is allowed and means "everything".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "keyword".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity of an add-to-cart request.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// Zero is allowed; negative is not.
///
/// ## Example
/// ```rust
/// use mtc_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("price", 1099).is_ok());
/// assert!(validate_price_cents("price", 0).is_ok());
/// assert!(validate_price_cents("price", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates everything about a new product except its cost code.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_product_code(&input.code)?;
    validate_product_name(&input.name)?;

    if let Some(description) = &input.description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }

    validate_price_cents("suggestedPrice", input.suggested_price_cents)?;
    if let Some(cost) = input.cost_price_cents {
        validate_price_cents("costPrice", cost)?;
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use mtc_core::validation::validate_uuid;
///
/// assert!(validate_uuid("productId", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("productId", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
