use super::*;
use crate::helpers::models::*;
use crate::helpers::utils::FakeRandom;
use crate::models::{Delivery, Driver};

fn get_two_groups() -> Vec<Delivery> {
    vec![
        test_delivery("D1", 0., 0.),
        test_delivery("D2", 0., 1.),
        test_delivery("D3", 1., 0.),
        test_delivery("D4", 10., 10.),
        test_delivery("D5", 10., 11.),
        test_delivery("D6", 11., 10.),
    ]
}

fn get_config(policy: AssignmentPolicy) -> AssignmentConfig {
    AssignmentConfig { policy, cluster_multiplier: 1., balance_weight: 0.08, ..AssignmentConfig::default() }
}

fn run_assignment(
    deliveries: &[Delivery],
    drivers: &[Driver],
    config: &AssignmentConfig,
    random: &dyn Random,
) -> (Vec<Vec<usize>>, Vec<usize>) {
    let mut ctx = AssignmentContext::new(deliveries, drivers);
    let free = ctx.free_deliveries();

    let result = assign_free_deliveries(&mut ctx, free.as_slice(), config, random);

    (ctx.buckets, result.dropped)
}

#[test]
fn can_calculate_balance_score() {
    assert_eq!(get_balance_score(10., 0, 0.08), 10.);
    assert!((get_balance_score(10., 5, 0.08) - 14.).abs() < 1E-9);
    assert_eq!(get_balance_score(10., 5, 0.), 10.);
}

parameterized_test! {can_select_driver_using_balance_weight, (balance_weight, expected), {
    can_select_driver_using_balance_weight_impl(balance_weight, expected);
}}

can_select_driver_using_balance_weight! {
    case01_distance_wins: (0.08, Some(0)),
    case02_load_wins: (0.2, Some(1)),
    case03_no_weight: (0., Some(0)),
}

fn can_select_driver_using_balance_weight_impl(balance_weight: Float, expected: Option<usize>) {
    let deliveries = (0..10).map(|idx| test_delivery(format!("D{idx}").as_str(), 0., 0.)).collect::<Vec<_>>();
    let drivers = vec![test_driver("A", Some((0., 0.))), test_driver("B", Some((3., 0.)))];
    let mut ctx = AssignmentContext::new(deliveries.as_slice(), drivers.as_slice());
    ctx.buckets[0] = (0..10).collect();

    let driver = select_driver(&ctx, &Point::new(1., 0.), balance_weight, |_| true);

    assert_eq!(driver, expected);
}

#[test]
fn can_select_first_driver_on_tie() {
    let drivers = vec![test_driver("A", Some((0., 2.))), test_driver("B", Some((2., 0.)))];
    let ctx = AssignmentContext::new(&[], drivers.as_slice());

    assert_eq!(select_driver(&ctx, &Point::new(0., 0.), 0.08, |_| true), Some(0));
}

#[test]
fn can_skip_drivers_without_location() {
    let drivers = vec![test_driver("A", None), test_driver("B", Some((50., 50.)))];
    let ctx = AssignmentContext::new(&[], drivers.as_slice());

    assert_eq!(select_driver(&ctx, &Point::new(0., 0.), 0.08, |_| true), Some(1));
    assert_eq!(select_driver(&ctx, &Point::new(0., 0.), 0.08, |driver| driver != 1), None);
}

#[test]
fn can_assign_balanced_clusters_to_nearest_drivers() {
    let deliveries = get_two_groups();
    let drivers = vec![test_driver("A", Some((0., 0.))), test_driver("B", Some((10., 10.)))];
    let random = FakeRandom::new(vec![0], vec![100.]);

    let (buckets, dropped) =
        run_assignment(deliveries.as_slice(), drivers.as_slice(), &get_config(AssignmentPolicy::BalancedClusters), &random);

    assert_eq!(buckets, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert!(dropped.is_empty());
}

#[test]
fn can_let_one_driver_take_many_balanced_clusters() {
    let deliveries = get_two_groups();
    let drivers = vec![test_driver("A", Some((0., 0.))), test_driver("B", Some((100., 100.)))];
    let random = FakeRandom::new(vec![0], vec![100.]);

    let (buckets, _) =
        run_assignment(deliveries.as_slice(), drivers.as_slice(), &get_config(AssignmentPolicy::BalancedClusters), &random);

    assert_eq!(buckets, vec![vec![0, 1, 2, 3, 4, 5], vec![]]);
}

#[test]
fn can_drop_clusters_when_no_driver_has_location() {
    let deliveries = get_two_groups();
    let drivers = vec![test_driver("A", None), test_driver("B", None)];
    let random = FakeRandom::new(vec![0], vec![100.]);

    let (buckets, dropped) =
        run_assignment(deliveries.as_slice(), drivers.as_slice(), &get_config(AssignmentPolicy::BalancedClusters), &random);

    assert_eq!(buckets, vec![Vec::<usize>::new(), vec![]]);
    assert_eq!(dropped, vec![0, 1, 2, 3, 4, 5]);
}

fn get_exclusive_deliveries() -> Vec<Delivery> {
    vec![test_delivery("D1", 0., 0.), test_delivery("D2", 0., 1.), test_delivery("D3", 5., 5.), test_delivery("D4", 5., 6.)]
}

#[test]
fn can_give_exclusive_clusters_to_different_drivers() {
    let deliveries = get_exclusive_deliveries();
    let drivers = vec![test_driver("A", Some((0., 0.))), test_driver("B", Some((100., 100.)))];
    // first center is (0, 0); cumulative squared distances are 1, 51, 112 so 60. selects (5, 6)
    let random = FakeRandom::new(vec![0], vec![60.]);

    let (buckets, dropped) = run_assignment(
        deliveries.as_slice(),
        drivers.as_slice(),
        &get_config(AssignmentPolicy::ExclusiveClusters),
        &random,
    );

    assert_eq!(buckets, vec![vec![0, 1], vec![2, 3]]);
    assert!(dropped.is_empty());
}

#[test]
fn can_create_exclusive_clusters_only_for_located_drivers() {
    let deliveries = get_exclusive_deliveries();
    let drivers = vec![test_driver("A", Some((0., 0.))), test_driver("B", None)];
    let random = FakeRandom::new(vec![0], vec![]);

    let (buckets, dropped) = run_assignment(
        deliveries.as_slice(),
        drivers.as_slice(),
        &get_config(AssignmentPolicy::ExclusiveClusters),
        &random,
    );

    assert_eq!(buckets, vec![vec![0, 1, 2, 3], vec![]]);
    assert!(dropped.is_empty());
}

#[test]
fn can_keep_exclusive_deliveries_when_first_driver_has_no_location() {
    let deliveries = vec![test_delivery("F1", 0., 0.), test_delivery("F2", 9., 9.)];
    let drivers = vec![test_driver("A", None), test_driver("B", Some((5., 5.)))];
    let random = FakeRandom::new(vec![0], vec![]);

    let (buckets, dropped) = run_assignment(
        deliveries.as_slice(),
        drivers.as_slice(),
        &get_config(AssignmentPolicy::ExclusiveClusters),
        &random,
    );

    assert_eq!(buckets, vec![vec![], vec![0, 1]]);
    assert!(dropped.is_empty());
}

#[test]
fn can_assign_each_delivery_to_nearest_driver() {
    let deliveries = vec![test_delivery("D1", 1., 1.), test_delivery("D2", 9., 9.), test_delivery("D3", 2., 2.)];
    let drivers = vec![test_driver("A", Some((0., 0.))), test_driver("B", Some((10., 10.)))];
    let random = FakeRandom::new(vec![], vec![]);

    let (buckets, _) =
        run_assignment(deliveries.as_slice(), drivers.as_slice(), &get_config(AssignmentPolicy::NearestDriver), &random);

    assert_eq!(buckets, vec![vec![0, 2], vec![1]]);
}

#[test]
fn can_skip_pinned_deliveries() {
    let deliveries = vec![test_pinned_delivery("D1", 10., 10., "A"), test_delivery("D2", 9., 9.)];
    let drivers = vec![test_driver("A", Some((0., 0.))), test_driver("B", Some((10., 10.)))];
    let random = FakeRandom::new(vec![], vec![]);

    let (buckets, _) =
        run_assignment(deliveries.as_slice(), drivers.as_slice(), &get_config(AssignmentPolicy::NearestDriver), &random);

    assert_eq!(buckets, vec![Vec::<usize>::new(), vec![1]]);
}
