use crate::assignment::{Assignment, AssignmentEngine};
use crate::helpers::models::*;
use crate::models::{AssignmentConfig, AssignmentPolicy, Delivery, Driver};
use crate::utils::Environment;
use proptest::prelude::*;
use std::collections::HashMap;

fn get_policy() -> impl Strategy<Value = AssignmentPolicy> {
    prop_oneof![
        Just(AssignmentPolicy::BalancedClusters),
        Just(AssignmentPolicy::ExclusiveClusters),
        Just(AssignmentPolicy::NearestDriver),
    ]
}

fn get_coordinate() -> impl Strategy<Value = (f64, f64)> {
    (-10_f64..10., -10_f64..10.)
}

prop_compose! {
    fn get_config()
    (
     capacity in 1_usize..8,
     policy in get_policy(),
     random_seed in any::<u64>(),
     balance_weight in 0_f64..0.5
    ) -> AssignmentConfig {
        AssignmentConfig { capacity_per_driver: capacity, policy, random_seed, balance_weight, ..AssignmentConfig::default() }
    }
}

prop_compose! {
    /// Generates drivers where some have no location, but at least one has.
    fn get_drivers()
    (
     locations in prop::collection::vec(prop::option::weighted(0.7, get_coordinate()), 1..6),
     located in any::<prop::sample::Index>()
    ) -> Vec<Driver> {
        let mut locations = locations;
        if locations.iter().all(Option::is_none) {
            let idx = located.index(locations.len());
            locations[idx] = Some((0., 0.));
        }

        locations.into_iter().enumerate().map(|(idx, location)| test_driver(format!("N{idx}").as_str(), location)).collect()
    }
}

prop_compose! {
    /// Generates a problem where free deliveries fit into total capacity and some deliveries are pinned.
    fn get_problem()
    (config in get_config(), drivers in get_drivers())
    (
     deliveries in prop::collection::vec(
        (get_coordinate(), prop::option::weighted(0.2, 0..drivers.len() + 1)),
        0..=config.capacity_per_driver * drivers.len()
     ),
     config in Just(config),
     drivers in Just(drivers)
    ) -> (Vec<Delivery>, Vec<Driver>, AssignmentConfig) {
        let deliveries = deliveries
            .into_iter()
            .enumerate()
            .map(|(idx, ((latitude, longitude), pin))| {
                let delivery = test_delivery(format!("D{idx}").as_str(), latitude, longitude);
                // the last index is used to produce a pin which matches no driver
                match pin {
                    Some(pin) if pin < drivers.len() => delivery.with_pin(format!(" n{pin} ").as_str()),
                    Some(_) => delivery.with_pin("unknown"),
                    None => delivery,
                }
            })
            .collect();

        (deliveries, drivers, config)
    }
}

fn run(deliveries: Vec<Delivery>, drivers: Vec<Driver>, config: AssignmentConfig) -> Assignment {
    AssignmentEngine::new(config).with_environment(Environment::silent()).run(deliveries, drivers).expect("cannot assign")
}

fn get_pinned_driver<'a>(delivery: &Delivery, drivers: &'a [Driver]) -> Option<&'a str> {
    let pin = delivery.pin()?.to_lowercase();
    drivers.iter().find(|driver| driver.name().to_lowercase() == pin).map(|driver| driver.name())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]
    #[test]
    fn can_assign_every_delivery_exactly_once((deliveries, drivers, config) in get_problem()) {
        let mut expected = deliveries.iter().map(|delivery| delivery.id().to_string()).collect::<Vec<_>>();

        let assignment = run(deliveries, drivers, config);

        let mut actual = assignment.drivers.iter()
            .flat_map(|driver| driver.deliveries().iter())
            .chain(assignment.unassigned.iter())
            .map(|delivery| delivery.id().to_string())
            .collect::<Vec<_>>();
        expected.sort();
        actual.sort();

        prop_assert_eq!(actual, expected);
        prop_assert!(assignment.unassigned.is_empty());
    }

    #[test]
    fn can_keep_pinned_deliveries_with_their_drivers((deliveries, drivers, config) in get_problem()) {
        let expected = deliveries.iter()
            .filter_map(|delivery| get_pinned_driver(delivery, drivers.as_slice()).map(|name| (delivery.id().to_string(), name.to_string())))
            .collect::<HashMap<_, _>>();

        let assignment = run(deliveries, drivers, config);

        for driver in assignment.drivers.iter() {
            for delivery in driver.deliveries() {
                if let Some(name) = expected.get(delivery.id()) {
                    prop_assert_eq!(name.as_str(), driver.name());
                }
            }
        }
    }

    #[test]
    fn can_respect_capacity_when_moves_are_possible((deliveries, drivers, config) in get_problem()) {
        let capacity = config.capacity_per_driver;
        let pinned = deliveries.iter()
            .filter_map(|delivery| get_pinned_driver(delivery, drivers.as_slice()).map(|_| delivery.id().to_string()))
            .collect::<Vec<_>>();

        let assignment = run(deliveries, drivers, config);

        let loads = assignment.drivers.iter().map(|driver| driver.deliveries().len()).collect::<Vec<_>>();
        for (idx, driver) in assignment.drivers.iter().enumerate() {
            if loads[idx] <= capacity {
                continue;
            }

            let has_movable = driver.deliveries().iter().any(|delivery| !pinned.iter().any(|id| id == delivery.id()));
            let has_recipient = assignment.drivers.iter().zip(loads.iter()).enumerate()
                .any(|(other, (recipient, &load))| other != idx && recipient.has_location() && load < capacity);

            // free deliveries go only to drivers with known location
            prop_assert!(driver.has_location() || !has_movable);

            // a driver stays over capacity only with pinned deliveries or when nobody else has room
            prop_assert!(!has_movable || !has_recipient);
        }
    }

    #[test]
    fn can_produce_same_assignment_for_same_input((deliveries, drivers, config) in get_problem()) {
        let first = run(deliveries.clone(), drivers.clone(), config.clone());
        let second = run(deliveries, drivers, config);

        prop_assert_eq!(first, second);
    }
}
