//! # Item
//!
//! A physical article in an order. Only its size and weight matter for
//! postage; both are taken as given and never re-validated here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A physical article to be shipped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Largest dimension in centimetres.
    pub size: f64,

    /// Mass in kilograms.
    #[serde(default)]
    pub weight: f64,
}

impl Item {
    /// An item of the given size with no recorded weight.
    pub const fn new(size: f64) -> Self {
        Item { size, weight: 0.0 }
    }

    pub const fn with_weight(size: f64, weight: f64) -> Self {
        Item { size, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_defaults_to_zero() {
        assert_eq!(Item::new(25.0).weight, 0.0);

        let item: Item = serde_json::from_str(r#"{ "size": 31 }"#).unwrap();
        assert_eq!(item, Item::new(31.0));
    }
}
