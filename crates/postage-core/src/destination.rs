//! # Destination
//!
//! Where an order is going, and what that means for delivery.
//!
//! Eligibility is derived once, at construction, by [`derive_eligibility`].
//! A `Destination` never changes afterwards, so the derived flags can never
//! disagree with the country and location they came from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  country        location            deliverable   mainland              │
//! │  ───────        ────────            ───────────   ────────              │
//! │  "UK"           None                true          true                  │
//! │  "UK"           "Scottish Borders"  true          true                  │
//! │  "UK"           "Isle of Man"       true          false                 │
//! │  "UK"           "Channel Islands"   true          false                 │
//! │  "France"       anything            false         false                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{NON_MAINLAND_LOCATIONS, SUPPORTED_COUNTRY};

/// Derived delivery eligibility of a country/location pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub deliverable: bool,
    pub mainland: bool,
}

/// Computes eligibility for a country and optional sub-location.
///
/// Mainland implies deliverable: an unsupported country is never mainland,
/// whatever its location.
///
/// ## Example
/// ```rust
/// use postage_core::destination::derive_eligibility;
///
/// let jersey = derive_eligibility("UK", Some("Channel Islands"));
/// assert!(jersey.deliverable);
/// assert!(!jersey.mainland);
/// ```
pub fn derive_eligibility(country: &str, location: Option<&str>) -> Eligibility {
    let deliverable = is_supported_destination(country);
    let off_mainland = location.is_some_and(|loc| NON_MAINLAND_LOCATIONS.contains(&loc));

    Eligibility {
        deliverable,
        mainland: deliverable && !off_mainland,
    }
}

/// Returns true if orders can be shipped to `country` at all.
#[inline]
pub fn is_supported_destination(country: &str) -> bool {
    country == SUPPORTED_COUNTRY
}

/// A shipping destination with its derived eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DestinationFields", into = "DestinationFields")]
pub struct Destination {
    country: String,
    location: Option<String>,
    eligibility: Eligibility,
}

impl Destination {
    /// Destination in `country` with no sub-location.
    pub fn new(country: impl Into<String>) -> Self {
        Self::build(country.into(), None)
    }

    /// Destination in `country` at a named sub-location.
    pub fn with_location(country: impl Into<String>, location: impl Into<String>) -> Self {
        Self::build(country.into(), Some(location.into()))
    }

    /// Mainland UK.
    pub fn uk() -> Self {
        Self::new(SUPPORTED_COUNTRY)
    }

    fn build(country: String, location: Option<String>) -> Self {
        let eligibility = derive_eligibility(&country, location.as_deref());
        Destination {
            country,
            location,
            eligibility,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[inline]
    pub fn is_deliverable(&self) -> bool {
        self.eligibility.deliverable
    }

    #[inline]
    pub fn is_mainland(&self) -> bool {
        self.eligibility.mainland
    }

    /// Location name if set, otherwise the country.
    pub fn display_name(&self) -> &str {
        self.location().unwrap_or(&self.country)
    }
}

impl Default for Destination {
    fn default() -> Self {
        Destination::uk()
    }
}

// Wire shape. Flags are always recomputed, never read from input.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DestinationFields {
    #[serde(default = "default_country")]
    country: String,
    #[serde(default)]
    location: Option<String>,
}

fn default_country() -> String {
    SUPPORTED_COUNTRY.to_string()
}

impl From<DestinationFields> for Destination {
    fn from(fields: DestinationFields) -> Self {
        Destination::build(fields.country, fields.location)
    }
}

impl From<Destination> for DestinationFields {
    fn from(destination: Destination) -> Self {
        DestinationFields {
            country: destination.country,
            location: destination.location,
        }
    }
}
