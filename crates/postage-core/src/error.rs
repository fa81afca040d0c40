//! # Error Types
//!
//! Domain-specific error types for postage-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  DeliveryError            - Request cannot be priced (caller input)     │
//! │  ├── UnsupportedDestination                                             │
//! │  └── NextDayUnavailable                                                 │
//! │                                                                         │
//! │  ConfigError              - Rule table could not be loaded              │
//! │  ├── NotFound                                                           │
//! │  └── Validation(ValidationError)                                        │
//! │                                                                         │
//! │  ParseDeliveryClassError  - Unknown delivery class name                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Carry the country or location so callers can build the message
//! 3. Errors are enum variants, never String

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Delivery Error
// =============================================================================

/// Reasons a postage request is rejected before any pricing happens.
///
/// Both variants are caller-input problems. Retrying the same request
/// always fails the same way, and no partial amount is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The destination country is not served.
    ///
    /// ## User Workflow
    /// ```text
    /// Destination { country: "France" }
    ///      │
    ///      ▼
    /// UnsupportedDestination { country: "France" }
    ///      │
    ///      ▼
    /// UI shows: "Sorry, we don't deliver to France yet."
    /// ```
    #[error("Sorry, we don't deliver to {country} yet.")]
    UnsupportedDestination { country: String },

    /// Next day delivery was requested for a deliverable location that is
    /// off the mainland.
    #[error("Cannot do Next Day Delivery to {location}")]
    NextDayUnavailable { location: String },
}

impl DeliveryError {
    /// Returns the country or location name embedded in the error.
    pub fn destination_name(&self) -> &str {
        match self {
            DeliveryError::UnsupportedDestination { country } => country,
            DeliveryError::NextDayUnavailable { location } => location,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rule table validation errors.
///
/// Raised while loading a rule table, before any calculator is built from it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// An amount in pence is negative.
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: String, value: i64 },

    /// An amount in pence is above the allowed maximum.
    #[error("{field} must not exceed {max} (got {value})")]
    AmountTooLarge { field: String, value: i64, max: i64 },

    /// A size or weight limit is negative, NaN or infinite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidLimit { field: String, value: f64 },

    /// Two surcharge rules share a name.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Failures while loading or saving a rule table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rules file was named but does not exist.
    #[error("Rules file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The rules file could not be read.
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    /// The rules file is not valid TOML for a rule table.
    #[error("Failed to parse rules: {0}")]
    Parse(#[from] toml::de::Error),

    /// The rule table could not be rendered as TOML.
    #[error("Failed to render rules: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The rule table parsed but breaks a constraint.
    #[error("Invalid rule table: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Parse Error
// =============================================================================

/// A delivery class name did not match any known class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown delivery class: '{0}'. Valid options: standard, first_class, next_day")]
pub struct ParseDeliveryClassError(pub String);

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of a postage calculation.
pub type PostageResult<T> = Result<T, DeliveryError>;

/// Result of loading a rule table.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
