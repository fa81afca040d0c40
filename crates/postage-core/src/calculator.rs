//! # Postage Calculator
//!
//! Prices an order against a [`RuleTable`].
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     calculate_postage(...)                              │
//! │                                                                         │
//! │  1. check_delivery ──── fails? ──► DeliveryError (nothing priced)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. base = n × standard rate, or 0 when declared total > threshold      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  3. supplement by class                                                 │
//! │       Standard   → 0                                                    │
//! │       FirstClass → n × first class supplement                           │
//! │       NextDay    → n × next day rate                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  4. surcharges: every rule for this class × every item it fires on      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  5. total = base + supplement + Σ surcharges                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All terms are integer pence, so the sum in step 5 is exact and the total
//! is already at two decimal places. Any rounding (half away from zero)
//! happened once, when floating-point pounds were turned into [`Money`].

use tracing::debug;

use crate::destination::Destination;
use crate::error::PostageResult;
use crate::item::Item;
use crate::money::Money;
use crate::rules::RuleTable;
use crate::types::{DeliveryClass, Quote, SurchargeLine};
use crate::validation::check_delivery;

/// Stateless postage evaluator.
///
/// Holds only its rule table, so one instance can be shared freely across
/// threads and every call is independent of every other.
///
/// ## Example
/// ```rust
/// use postage_core::{DeliveryClass, Destination, Item, Money, PostageCalculator};
///
/// let calculator = PostageCalculator::default();
/// let postage = calculator
///     .calculate_postage(
///         &[Item::new(31.0)],
///         DeliveryClass::FirstClass,
///         Money::from_pounds(24.99),
///         &Destination::uk(),
///     )
///     .unwrap();
///
/// assert_eq!(postage, Money::from_pounds(27.88));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostageCalculator {
    rules: RuleTable,
}

impl PostageCalculator {
    pub fn new(rules: RuleTable) -> Self {
        PostageCalculator { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Runs only the validation step.
    pub fn check_delivery(
        &self,
        delivery_class: DeliveryClass,
        destination: &Destination,
    ) -> PostageResult<()> {
        check_delivery(delivery_class, destination)
    }

    /// Computes the total postage for an order.
    ///
    /// `declared_total` is compared in whole pence against the free
    /// threshold. A total built with [`Money::from_pounds`] is rounded to
    /// the nearest penny first, so £25.004 counts as £25.00 and still pays
    /// postage. Callers holding sub-penny totals should round them the way
    /// their checkout does before calling.
    ///
    /// ## Errors
    /// - `UnsupportedDestination` if the country is not served
    /// - `NextDayUnavailable` for next day delivery off the mainland
    pub fn calculate_postage(
        &self,
        items: &[Item],
        delivery_class: DeliveryClass,
        declared_total: Money,
        destination: &Destination,
    ) -> PostageResult<Money> {
        self.quote(items, delivery_class, declared_total, destination)
            .map(|quote| quote.total)
    }

    /// Computes postage with a line-by-line breakdown.
    pub fn quote(
        &self,
        items: &[Item],
        delivery_class: DeliveryClass,
        declared_total: Money,
        destination: &Destination,
    ) -> PostageResult<Quote> {
        if let Err(e) = self.check_delivery(delivery_class, destination) {
            debug!(
                class = %delivery_class,
                country = destination.country(),
                error = %e,
                "Postage request rejected"
            );
            return Err(e);
        }

        let item_count = items.len();
        let base = self.standard_postage(item_count, declared_total);
        let supplement = self.class_supplement(delivery_class, item_count);
        let surcharges = self.surcharges(items, delivery_class);

        let total = base + supplement + surcharges.iter().map(|line| line.amount).sum::<Money>();

        debug!(
            class = %delivery_class,
            items = item_count,
            declared_total = declared_total.pence(),
            base = base.pence(),
            supplement = supplement.pence(),
            surcharges = surcharges.len(),
            total = total.pence(),
            "Postage calculated"
        );

        Ok(Quote {
            delivery_class,
            item_count,
            base,
            supplement,
            surcharges,
            total,
        })
    }

    /// Standard postage, waived only when the declared total is strictly
    /// above the free threshold.
    fn standard_postage(&self, item_count: usize, declared_total: Money) -> Money {
        if declared_total <= self.rules.free_threshold() {
            self.rules.standard_per_item().per_item(item_count)
        } else {
            Money::zero()
        }
    }

    fn class_supplement(&self, delivery_class: DeliveryClass, item_count: usize) -> Money {
        match delivery_class {
            DeliveryClass::Standard => Money::zero(),
            DeliveryClass::FirstClass => self.rules.first_class_supplement().per_item(item_count),
            DeliveryClass::NextDay => self.rules.next_day_per_item().per_item(item_count),
        }
    }

    fn surcharges(&self, items: &[Item], delivery_class: DeliveryClass) -> Vec<SurchargeLine> {
        let mut lines = Vec::new();

        for (item_index, item) in items.iter().enumerate() {
            for rule in self.rules.surcharges_for(delivery_class) {
                if rule.triggered_by(item) {
                    lines.push(SurchargeLine {
                        name: rule.name.clone(),
                        item_index,
                        amount: rule.amount(),
                    });
                }
            }
        }

        lines
    }
}

/// Computes postage with the default rule table.
pub fn calculate_postage(
    items: &[Item],
    delivery_class: DeliveryClass,
    declared_total: Money,
    destination: &Destination,
) -> PostageResult<Money> {
    PostageCalculator::default().calculate_postage(
        items,
        delivery_class,
        declared_total,
        destination,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeliveryError;
    use crate::rules::{Measure, SurchargeRule};

    fn items(n: usize) -> Vec<Item> {
        vec![Item::new(25.0); n]
    }

    fn pounds(amount: f64) -> Money {
        Money::from_pounds(amount)
    }

    #[test]
    fn test_standard_under_and_over_threshold() {
        let calc = PostageCalculator::default();
        let uk = Destination::uk();

        let under = calc
            .calculate_postage(&items(1), DeliveryClass::Standard, pounds(24.99), &uk)
            .unwrap();
        assert_eq!(under, pounds(4.99));

        let over = calc
            .calculate_postage(&items(1), DeliveryClass::Standard, pounds(25.01), &uk)
            .unwrap();
        assert!(over.is_zero());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let calc = PostageCalculator::default();
        let postage = calc
            .calculate_postage(&items(3), DeliveryClass::Standard, pounds(25.0), &Destination::uk())
            .unwrap();
        assert_eq!(postage, pounds(14.97));
    }

    #[test]
    fn test_sub_penny_total_is_compared_in_whole_pence() {
        let calc = PostageCalculator::default();
        let uk = Destination::uk();

        // 25.004 rounds down to the threshold and still pays
        let postage = calc
            .calculate_postage(&items(1), DeliveryClass::Standard, pounds(25.004), &uk)
            .unwrap();
        assert_eq!(postage, pounds(4.99));

        // 25.006 rounds up past it
        let postage = calc
            .calculate_postage(&items(1), DeliveryClass::Standard, pounds(25.006), &uk)
            .unwrap();
        assert!(postage.is_zero());
    }

    #[test]
    fn test_empty_order_costs_nothing() {
        let calc = PostageCalculator::default();
        for class in DeliveryClass::ALL {
            let quote = calc
                .quote(&[], class, pounds(10.0), &Destination::uk())
                .unwrap();
            assert_eq!(quote.item_count, 0);
            assert!(quote.is_free());
        }
    }

    #[test]
    fn test_quote_breakdown_for_first_class() {
        let calc = PostageCalculator::default();
        let order = [Item::new(24.0), Item::with_weight(31.0, 15.01)];

        let quote = calc
            .quote(&order, DeliveryClass::FirstClass, pounds(24.99), &Destination::uk())
            .unwrap();

        assert_eq!(quote.base, pounds(9.98));
        assert_eq!(quote.supplement, pounds(5.98));
        assert_eq!(quote.surcharges.len(), 2);
        assert_eq!(quote.surcharges[0].name, "large_item");
        assert_eq!(quote.surcharges[0].item_index, 1);
        assert_eq!(quote.surcharges[1].name, "heavy_item");
        assert_eq!(quote.surcharge_total(), pounds(59.80));
        assert_eq!(quote.total, pounds(75.76));
        assert_eq!(
            quote.total,
            quote.base + quote.supplement + quote.surcharge_total()
        );
    }

    #[test]
    fn test_next_day_ignores_physical_surcharges() {
        let calc = PostageCalculator::default();
        let heavy_and_large = [Item::with_weight(40.0, 20.0)];

        let quote = calc
            .quote(
                &heavy_and_large,
                DeliveryClass::NextDay,
                pounds(24.99),
                &Destination::uk(),
            )
            .unwrap();

        assert!(quote.surcharges.is_empty());
        assert_eq!(quote.total, pounds(16.98));
    }

    #[test]
    fn test_standard_ignores_physical_surcharges() {
        let calc = PostageCalculator::default();
        let postage = calc
            .calculate_postage(
                &[Item::with_weight(40.0, 20.0)],
                DeliveryClass::Standard,
                pounds(24.99),
                &Destination::uk(),
            )
            .unwrap();
        assert_eq!(postage, pounds(4.99));
    }

    #[test]
    fn test_validation_runs_before_pricing() {
        let calc = PostageCalculator::default();

        let err = calc
            .calculate_postage(
                &items(1),
                DeliveryClass::Standard,
                pounds(11.0),
                &Destination::new("France"),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Sorry, we don't deliver to France yet.");

        let err = calc
            .calculate_postage(
                &items(1),
                DeliveryClass::NextDay,
                pounds(11.0),
                &Destination::with_location("UK", "Isle of Man"),
            )
            .unwrap_err();
        assert_eq!(
            err,
            DeliveryError::NextDayUnavailable {
                location: "Isle of Man".to_string()
            }
        );
    }

    #[test]
    fn test_off_mainland_standard_and_first_class_are_priced() {
        let calc = PostageCalculator::default();
        let jersey = Destination::with_location("UK", "Channel Islands");

        let first = calc
            .calculate_postage(&items(1), DeliveryClass::FirstClass, pounds(23.01), &jersey)
            .unwrap();
        assert_eq!(first, pounds(7.98));
    }

    #[test]
    fn test_custom_rule_table() {
        let mut rules = RuleTable::default();
        rules.free_threshold_pence = 5000;
        rules.surcharges.push(SurchargeRule::new(
            "bulky_next_day",
            Measure::Size,
            50.0,
            1000,
            [DeliveryClass::NextDay],
        ));
        let calc = PostageCalculator::new(rules);

        let postage = calc
            .calculate_postage(
                &[Item::new(60.0)],
                DeliveryClass::NextDay,
                pounds(30.0),
                &Destination::uk(),
            )
            .unwrap();

        // 4.99 standard (under the raised threshold) + 11.99 + 10.00
        assert_eq!(postage, pounds(26.98));
        assert_eq!(calc.rules().free_threshold_pence, 5000);
    }

    #[test]
    fn test_free_function_uses_default_rules() {
        let postage = calculate_postage(
            &items(2),
            DeliveryClass::Standard,
            pounds(24.99),
            &Destination::uk(),
        )
        .unwrap();
        assert_eq!(postage, pounds(9.98));
    }
}
