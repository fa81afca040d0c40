//! # postage-core: Postage Calculation Engine
//!
//! Given an order's items, delivery class, declared goods total and
//! destination, computes the postage to charge, or explains why the order
//! cannot be delivered.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Postage Engine                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                quote binary (JSON in, JSON out)                 │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ postage-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │   ┌─────────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │    │
//! │  │   │ destination │  │   money   │  │   rules   │  │ validation│  │    │
//! │  │   │    item     │  │   Money   │  │ RuleTable │  │  checks   │  │    │
//! │  │   │    types    │  │           │  │ Surcharge │  │           │  │    │
//! │  │   └─────────────┘  └───────────┘  └───────────┘  └───────────┘  │    │
//! │  │                         calculator                              │    │
//! │  │                                                                 │    │
//! │  │   NO DATABASE • NO NETWORK • STATELESS CALCULATIONS             │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - The postage evaluator
//! - [`destination`] - Destinations and their derived eligibility
//! - [`item`] - Physical items
//! - [`types`] - Delivery classes, orders and quotes
//! - [`money`] - Integer pence arithmetic
//! - [`rules`] - The rule table and its loader
//! - [`validation`] - Pre-pricing checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use postage_core::{DeliveryClass, Destination, Item, Money, PostageCalculator};
//!
//! let calculator = PostageCalculator::default();
//!
//! // One 24cm, 15.01kg item by first class: 4.99 + 2.99 + 39.90
//! let postage = calculator
//!     .calculate_postage(
//!         &[Item::with_weight(24.0, 15.01)],
//!         DeliveryClass::FirstClass,
//!         Money::from_pounds(24.99),
//!         &Destination::uk(),
//!     )
//!     .unwrap();
//! assert_eq!(postage.pence(), 4788);
//!
//! // No next day delivery to the islands
//! let err = calculator
//!     .calculate_postage(
//!         &[Item::new(10.0)],
//!         DeliveryClass::NextDay,
//!         Money::from_pounds(10.0),
//!         &Destination::with_location("UK", "Isle of Man"),
//!     )
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "Cannot do Next Day Delivery to Isle of Man");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod destination;
pub mod error;
pub mod item;
pub mod money;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{calculate_postage, PostageCalculator};
pub use destination::Destination;
pub use error::{ConfigError, DeliveryError, PostageResult, ValidationError};
pub use item::Item;
pub use money::Money;
pub use rules::RuleTable;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The only country orders are shipped to.
pub const SUPPORTED_COUNTRY: &str = "UK";

/// Locations within the supported country that are off the mainland.
///
/// Matched exactly against [`Destination::location`]. Everywhere else in
/// the UK counts as mainland.
pub const NON_MAINLAND_LOCATIONS: [&str; 2] = ["Channel Islands", "Isle of Man"];

/// Largest amount in pence a rule table may carry (£1,000,000).
///
/// Keeps every rate, threshold and surcharge far away from `i64` overflow
/// once multiplied by an item count.
pub const MAX_AMOUNT_PENCE: i64 = 100_000_000;
