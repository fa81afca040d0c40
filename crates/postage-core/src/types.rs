//! # Domain Types
//!
//! Request and result types shared by the calculator and its callers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │     Order       │   │ DeliveryClass   │   │     Quote       │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  items          │   │  Standard       │   │  base           │        │
//! │  │  delivery_class │   │  FirstClass     │   │  supplement     │        │
//! │  │  declared_total │   │  NextDay        │   │  surcharges     │        │
//! │  │  destination    │   └─────────────────┘   │  total          │        │
//! │  └─────────────────┘                         └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::calculator::PostageCalculator;
use crate::destination::Destination;
use crate::error::{ParseDeliveryClassError, PostageResult};
use crate::item::Item;
use crate::money::Money;

// =============================================================================
// Delivery Class
// =============================================================================

/// The service tier requested for an order.
///
/// ## Pricing Summary
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  STANDARD     £4.99 per item, free when the order total is over £25     │
/// │  FIRST CLASS  standard + £2.99 per item + size/weight surcharges        │
/// │  NEXT DAY     standard + £11.99 per item, mainland UK only              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryClass {
    #[default]
    Standard,
    FirstClass,
    NextDay,
}

impl DeliveryClass {
    /// Every class, in price order.
    pub const ALL: [DeliveryClass; 3] = [
        DeliveryClass::Standard,
        DeliveryClass::FirstClass,
        DeliveryClass::NextDay,
    ];

    /// Returns true if this class is restricted to mainland destinations.
    pub fn requires_mainland(&self) -> bool {
        matches!(self, DeliveryClass::NextDay)
    }
}

impl fmt::Display for DeliveryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryClass::Standard => write!(f, "standard"),
            DeliveryClass::FirstClass => write!(f, "first_class"),
            DeliveryClass::NextDay => write!(f, "next_day"),
        }
    }
}

impl FromStr for DeliveryClass {
    type Err = ParseDeliveryClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "regular" => Ok(DeliveryClass::Standard),
            "first" | "first_class" | "firstclass" => Ok(DeliveryClass::FirstClass),
            "nextday" | "next_day" | "nextdaydelivery" => Ok(DeliveryClass::NextDay),
            _ => Err(ParseDeliveryClassError(s.to_string())),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// Everything needed to price postage for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Items to ship. May be empty.
    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub delivery_class: DeliveryClass,

    /// Goods total before postage, in pence.
    pub declared_total_pence: i64,

    #[serde(default)]
    pub destination: Destination,
}

impl Order {
    /// Returns the declared goods total as Money.
    #[inline]
    pub fn declared_total(&self) -> Money {
        Money::from_pence(self.declared_total_pence)
    }

    /// Prices this order's postage.
    pub fn postage(&self, calculator: &PostageCalculator) -> PostageResult<Money> {
        self.quote(calculator).map(|quote| quote.total)
    }

    /// Prices this order's postage with a full breakdown.
    pub fn quote(&self, calculator: &PostageCalculator) -> PostageResult<Quote> {
        calculator.quote(
            &self.items,
            self.delivery_class,
            self.declared_total(),
            &self.destination,
        )
    }
}

// =============================================================================
// Quote
// =============================================================================

/// One surcharge applied to one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SurchargeLine {
    /// Name of the rule that fired, e.g. `large_item`.
    pub name: String,

    /// Position of the item in the order.
    pub item_index: usize,

    pub amount: Money,
}

/// Itemised result of a postage calculation.
///
/// `total == base + supplement + sum(surcharges)` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quote {
    pub delivery_class: DeliveryClass,

    pub item_count: usize,

    /// Standard postage (zero above the free threshold).
    pub base: Money,

    /// Per-item add-on for the delivery class (zero for standard).
    pub supplement: Money,

    /// Physical surcharges in item order.
    pub surcharges: Vec<SurchargeLine>,

    pub total: Money,
}

impl Quote {
    /// Sum of all surcharge lines.
    pub fn surcharge_total(&self) -> Money {
        self.surcharges.iter().map(|line| line.amount).sum()
    }

    /// Returns true if nothing is payable.
    pub fn is_free(&self) -> bool {
        self.total.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
