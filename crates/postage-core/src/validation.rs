//! # Validation Module
//!
//! Checks that run before any money is computed.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rule table load (once, at startup)                            │
//! │  ├── Amounts non-negative and at most MAX_AMOUNT_PENCE                  │
//! │  ├── Limits finite and non-negative                                     │
//! │  └── Surcharge names present and unique                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Every postage request                                         │
//! │  ├── Destination country supported?                                     │
//! │  └── Next day requested off the mainland?                               │
//! │                                                                         │
//! │  A failing request is rejected whole: no partial amount is produced     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::destination::Destination;
use crate::error::{DeliveryError, PostageResult, ValidationError};
use crate::types::DeliveryClass;
use crate::MAX_AMOUNT_PENCE;

/// Result type for rule table validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Request Validators
// =============================================================================

/// Rejects requests that cannot be delivered.
///
/// ## Order of Checks
/// ```text
/// check_delivery(class, destination)
///      │
///      ├── country != "UK"?                 → UnsupportedDestination
///      │
///      ├── NextDay and not mainland?        → NextDayUnavailable
///      │
///      └── OK → pricing
/// ```
///
/// The country check always wins, so an unsupported country reports
/// `UnsupportedDestination` even for next day requests.
///
/// ## Example
/// ```rust
/// use postage_core::destination::Destination;
/// use postage_core::types::DeliveryClass;
/// use postage_core::validation::check_delivery;
///
/// let douglas = Destination::with_location("UK", "Isle of Man");
/// assert!(check_delivery(DeliveryClass::Standard, &douglas).is_ok());
/// assert!(check_delivery(DeliveryClass::NextDay, &douglas).is_err());
/// ```
pub fn check_delivery(class: DeliveryClass, destination: &Destination) -> PostageResult<()> {
    if !destination.is_deliverable() {
        return Err(DeliveryError::UnsupportedDestination {
            country: destination.country().to_string(),
        });
    }

    if class.requires_mainland() && !destination.is_mainland() {
        return Err(DeliveryError::NextDayUnavailable {
            location: destination.display_name().to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Rule Table Validators
// =============================================================================

/// Validates an amount in pence.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (a free rate)
/// - Must not exceed MAX_AMOUNT_PENCE (£1,000,000)
pub fn validate_amount_pence(field: &str, pence: i64) -> ValidationResult<()> {
    if pence < 0 {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
            value: pence,
        });
    }

    if pence > MAX_AMOUNT_PENCE {
        return Err(ValidationError::AmountTooLarge {
            field: field.to_string(),
            value: pence,
            max: MAX_AMOUNT_PENCE,
        });
    }

    Ok(())
}

/// Validates a size or weight limit.
pub fn validate_limit(field: &str, limit: f64) -> ValidationResult<()> {
    if !limit.is_finite() || limit < 0.0 {
        return Err(ValidationError::InvalidLimit {
            field: field.to_string(),
            value: limit,
        });
    }

    Ok(())
}

/// Validates that surcharge rule names are non-empty and unique.
pub fn validate_surcharge_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for name in names {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "surcharge name".to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(ValidationError::Duplicate {
                field: "surcharge name".to_string(),
                value: name.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
