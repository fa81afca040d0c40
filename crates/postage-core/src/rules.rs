//! # Rule Table
//!
//! Every rate, threshold and surcharge the calculator uses, in one
//! immutable value.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     POSTAGE_FREE_THRESHOLD_PENCE=3000                                   │
//! │                                                                         │
//! │  2. TOML Rules File                                                     │
//! │     passed explicitly, e.g. `quote --rules postage.toml`                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     The published tariff: £4.99 / £2.99 / £11.99, free over £25         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules File Format
//! ```toml
//! standard_per_item_pence = 499
//! first_class_supplement_pence = 299
//! next_day_per_item_pence = 1199
//! free_threshold_pence = 2500
//!
//! [[surcharges]]
//! name = "large_item"
//! measure = "size"
//! limit = 30.0
//! amount_pence = 1990
//! classes = ["first_class"]
//!
//! [[surcharges]]
//! name = "heavy_item"
//! measure = "weight"
//! limit = 15.0
//! amount_pence = 3990
//! classes = ["first_class"]
//! ```
//!
//! Keys left out of the file keep their defaults. A file that sets
//! `surcharges` replaces the whole default list.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::item::Item;
use crate::money::Money;
use crate::types::DeliveryClass;
use crate::validation::{validate_amount_pence, validate_limit, validate_surcharge_names};

/// Environment variable overriding [`RuleTable::standard_per_item_pence`].
pub const ENV_STANDARD_PER_ITEM: &str = "POSTAGE_STANDARD_PER_ITEM_PENCE";
/// Environment variable overriding [`RuleTable::first_class_supplement_pence`].
pub const ENV_FIRST_CLASS_SUPPLEMENT: &str = "POSTAGE_FIRST_CLASS_SUPPLEMENT_PENCE";
/// Environment variable overriding [`RuleTable::next_day_per_item_pence`].
pub const ENV_NEXT_DAY_PER_ITEM: &str = "POSTAGE_NEXT_DAY_PER_ITEM_PENCE";
/// Environment variable overriding [`RuleTable::free_threshold_pence`].
pub const ENV_FREE_THRESHOLD: &str = "POSTAGE_FREE_THRESHOLD_PENCE";

// =============================================================================
// Surcharge Rules
// =============================================================================

/// Which physical attribute of an item a surcharge rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Largest dimension, centimetres.
    Size,
    /// Mass, kilograms.
    Weight,
}

impl Measure {
    #[inline]
    pub fn of(&self, item: &Item) -> f64 {
        match self {
            Measure::Size => item.size,
            Measure::Weight => item.weight,
        }
    }
}

/// A per-item surcharge triggered when a measure exceeds a limit.
///
/// ## Example
/// ```rust
/// use postage_core::item::Item;
/// use postage_core::rules::{Measure, SurchargeRule};
/// use postage_core::types::DeliveryClass;
///
/// let rule = SurchargeRule::new("large_item", Measure::Size, 30.0, 1990, [DeliveryClass::FirstClass]);
/// assert!(rule.triggered_by(&Item::new(31.0)));
/// assert!(!rule.triggered_by(&Item::new(30.0))); // strictly greater
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeRule {
    pub name: String,

    pub measure: Measure,

    /// Exclusive limit: the rule fires only when the measure is above it.
    pub limit: f64,

    pub amount_pence: i64,

    /// Delivery classes this rule applies to.
    #[serde(default = "default_surcharge_classes")]
    pub classes: Vec<DeliveryClass>,
}

fn default_surcharge_classes() -> Vec<DeliveryClass> {
    vec![DeliveryClass::FirstClass]
}

impl SurchargeRule {
    pub fn new(
        name: impl Into<String>,
        measure: Measure,
        limit: f64,
        amount_pence: i64,
        classes: impl IntoIterator<Item = DeliveryClass>,
    ) -> Self {
        SurchargeRule {
            name: name.into(),
            measure,
            limit,
            amount_pence,
            classes: classes.into_iter().collect(),
        }
    }

    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_pence(self.amount_pence)
    }

    pub fn applies_to(&self, class: DeliveryClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn triggered_by(&self, item: &Item) -> bool {
        self.measure.of(item) > self.limit
    }
}

// =============================================================================
// Rule Table
// =============================================================================

/// The complete pricing configuration.
///
/// Construct once and hand to [`PostageCalculator::new`](crate::PostageCalculator::new);
/// the calculator never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Standard postage per item.
    #[serde(default = "default_standard_per_item")]
    pub standard_per_item_pence: i64,

    /// First class add-on per item.
    #[serde(default = "default_first_class_supplement")]
    pub first_class_supplement_pence: i64,

    /// Next day add-on per item.
    #[serde(default = "default_next_day_per_item")]
    pub next_day_per_item_pence: i64,

    /// Orders totalling more than this get free standard postage.
    /// An order exactly at the threshold still pays.
    #[serde(default = "default_free_threshold")]
    pub free_threshold_pence: i64,

    /// Physical surcharges, evaluated per item.
    #[serde(default = "default_surcharges")]
    pub surcharges: Vec<SurchargeRule>,
}

fn default_standard_per_item() -> i64 {
    499
}

fn default_first_class_supplement() -> i64 {
    299
}

fn default_next_day_per_item() -> i64 {
    1199
}

fn default_free_threshold() -> i64 {
    2500
}

fn default_surcharges() -> Vec<SurchargeRule> {
    vec![
        SurchargeRule::new(
            "large_item",
            Measure::Size,
            30.0,
            1990,
            [DeliveryClass::FirstClass],
        ),
        SurchargeRule::new(
            "heavy_item",
            Measure::Weight,
            15.0,
            3990,
            [DeliveryClass::FirstClass],
        ),
    ]
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable {
            standard_per_item_pence: default_standard_per_item(),
            first_class_supplement_pence: default_first_class_supplement(),
            next_day_per_item_pence: default_next_day_per_item(),
            free_threshold_pence: default_free_threshold(),
            surcharges: default_surcharges(),
        }
    }
}

impl RuleTable {
    /// Loads the rule table from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Rules file, if `path` is given
    /// 3. Environment variables
    ///
    /// A `path` that does not exist is an error, never a silent fallback.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`RuleTable::load`], reading overrides through `lookup`
    /// instead of the process environment.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rules = match path {
            Some(path) => {
                if !path.exists() {
                    warn!(?path, "Rules file not found");
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                info!(?path, "Loading postage rules from file");
                let contents = fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => {
                debug!("No rules file given, using defaults");
                Self::default()
            }
        };

        rules.apply_overrides(lookup);
        rules.validate()?;

        Ok(rules)
    }

    /// Loads the rule table or returns the defaults if loading fails.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("Failed to load postage rules: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates a rule table from TOML text.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let rules: Self = toml::from_str(contents)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Renders the rule table as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every amount, limit and surcharge name.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_amount_pence("standard_per_item_pence", self.standard_per_item_pence)?;
        validate_amount_pence(
            "first_class_supplement_pence",
            self.first_class_supplement_pence,
        )?;
        validate_amount_pence("next_day_per_item_pence", self.next_day_per_item_pence)?;
        validate_amount_pence("free_threshold_pence", self.free_threshold_pence)?;

        validate_surcharge_names(self.surcharges.iter().map(|rule| rule.name.as_str()))?;
        for rule in &self.surcharges {
            validate_limit(&format!("surcharge '{}' limit", rule.name), rule.limit)?;
            validate_amount_pence(
                &format!("surcharge '{}' amount_pence", rule.name),
                rule.amount_pence,
            )?;
        }

        Ok(())
    }

    /// Applies per-rate overrides looked up by environment variable name.
    ///
    /// Values that don't parse as integers are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (ENV_STANDARD_PER_ITEM, &mut self.standard_per_item_pence),
            (
                ENV_FIRST_CLASS_SUPPLEMENT,
                &mut self.first_class_supplement_pence,
            ),
            (ENV_NEXT_DAY_PER_ITEM, &mut self.next_day_per_item_pence),
            (ENV_FREE_THRESHOLD, &mut self.free_threshold_pence),
        ];

        for (key, field) in fields {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match raw.trim().parse::<i64>() {
                Ok(pence) => {
                    debug!(key, pence, "Overriding postage rate from environment");
                    *field = pence;
                }
                Err(_) => warn!(key, value = %raw, "Ignoring unparseable postage override"),
            }
        }
    }

    // =========================================================================
    // Convenience Accessors
    // =========================================================================

    #[inline]
    pub fn standard_per_item(&self) -> Money {
        Money::from_pence(self.standard_per_item_pence)
    }

    #[inline]
    pub fn first_class_supplement(&self) -> Money {
        Money::from_pence(self.first_class_supplement_pence)
    }

    #[inline]
    pub fn next_day_per_item(&self) -> Money {
        Money::from_pence(self.next_day_per_item_pence)
    }

    #[inline]
    pub fn free_threshold(&self) -> Money {
        Money::from_pence(self.free_threshold_pence)
    }

    /// Surcharge rules that apply to `class`, in table order.
    pub fn surcharges_for(&self, class: DeliveryClass) -> impl Iterator<Item = &SurchargeRule> {
        self.surcharges
            .iter()
            .filter(move |rule| rule.applies_to(class))
    }
}
