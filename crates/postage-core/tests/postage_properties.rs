//! Property tests over the default tariff.

use postage_core::{DeliveryClass, DeliveryError, Destination, Item, Money, PostageCalculator};
use proptest::prelude::*;

fn item_strategy() -> impl Strategy<Value = Item> {
    (0.0f64..100.0, 0.0f64..40.0).prop_map(|(size, weight)| Item::with_weight(size, weight))
}

fn class_strategy() -> impl Strategy<Value = DeliveryClass> {
    prop_oneof![
        Just(DeliveryClass::Standard),
        Just(DeliveryClass::FirstClass),
        Just(DeliveryClass::NextDay),
    ]
}

fn uk_destination_strategy() -> impl Strategy<Value = Destination> {
    prop_oneof![
        Just(Destination::uk()),
        Just(Destination::with_location("UK", "Scottish Highlands")),
        Just(Destination::with_location("UK", "Channel Islands")),
        Just(Destination::with_location("UK", "Isle of Man")),
    ]
}

proptest! {
    #[test]
    fn identical_calls_give_identical_results(
        items in prop::collection::vec(item_strategy(), 0..8),
        class in class_strategy(),
        total_pence in 0i64..10_000,
        destination in uk_destination_strategy(),
    ) {
        let calculator = PostageCalculator::default();
        let total = Money::from_pence(total_pence);

        let first = calculator.quote(&items, class, total, &destination);
        let second = calculator.quote(&items, class, total, &destination);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unsupported_countries_always_fail(
        country in "[A-Za-z ]{1,20}",
        items in prop::collection::vec(item_strategy(), 0..4),
        class in class_strategy(),
        total_pence in 0i64..10_000,
    ) {
        prop_assume!(country != "UK");
        let destination = Destination::new(country.clone());

        let result = PostageCalculator::default()
            .calculate_postage(&items, class, Money::from_pence(total_pence), &destination);
        prop_assert_eq!(result, Err(DeliveryError::UnsupportedDestination { country }));
    }

    #[test]
    fn standard_is_free_over_threshold(
        items in prop::collection::vec(item_strategy(), 0..8),
        total_pence in 2501i64..1_000_000,
    ) {
        let postage = PostageCalculator::default()
            .calculate_postage(
                &items,
                DeliveryClass::Standard,
                Money::from_pence(total_pence),
                &Destination::uk(),
            )
            .unwrap();
        prop_assert!(postage.is_zero());
    }

    #[test]
    fn first_class_is_monotonic_in_size_and_weight(
        items in prop::collection::vec(item_strategy(), 1..6),
        index in any::<prop::sample::Index>(),
        extra_size in 0.0f64..50.0,
        extra_weight in 0.0f64..50.0,
        total_pence in 0i64..5_000,
    ) {
        let calculator = PostageCalculator::default();
        let total = Money::from_pence(total_pence);
        let uk = Destination::uk();

        let mut bigger = items.clone();
        let i = index.index(bigger.len());
        bigger[i].size += extra_size;
        bigger[i].weight += extra_weight;

        let before = calculator
            .calculate_postage(&items, DeliveryClass::FirstClass, total, &uk)
            .unwrap();
        let after = calculator
            .calculate_postage(&bigger, DeliveryClass::FirstClass, total, &uk)
            .unwrap();
        prop_assert!(after >= before);
    }

    #[test]
    fn total_is_sum_of_breakdown(
        items in prop::collection::vec(item_strategy(), 0..8),
        class in class_strategy(),
        total_pence in 0i64..10_000,
    ) {
        let quote = PostageCalculator::default()
            .quote(&items, class, Money::from_pence(total_pence), &Destination::uk())
            .unwrap();

        prop_assert_eq!(quote.item_count, items.len());
        prop_assert_eq!(quote.total, quote.base + quote.supplement + quote.surcharge_total());
        prop_assert!(!quote.total.is_negative());
        if class != DeliveryClass::FirstClass {
            prop_assert!(quote.surcharges.is_empty());
        }
    }
}
