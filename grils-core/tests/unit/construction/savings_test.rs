use super::*;
use crate::helpers::models::create_line_instance;
use crate::models::Solution;

#[test]
fn can_fuse_line_customers_into_capacity_bounded_routes() {
    // Four customers on a line, unit demands, capacity two: the best savings
    // pair up consecutive customers.
    let instance = create_line_instance(4, 2);
    let mut solution = Solution::new(instance.clone(), 10);

    clarke_and_wright(&instance, &mut solution, 1.0, 100);

    assert_eq!(solution.routes_num(), 2);
    assert_eq!(solution.cost(), 12.);

    let report = solution.check_feasible(true);
    assert!(report.is_feasible(), "{:?}", report.errors);
}

#[test]
fn can_merge_everything_with_ample_capacity() {
    let instance = create_line_instance(3, 100);
    let mut solution = Solution::new(instance.clone(), 10);

    clarke_and_wright(&instance, &mut solution, 1.0, 100);

    // One route visiting the line in order: 1 + 1 + 1 + 3.
    assert_eq!(solution.routes_num(), 1);
    assert_eq!(solution.cost(), 6.);
}

#[test]
fn can_leave_journal_empty_after_construction() {
    let instance = create_line_instance(3, 100);
    let mut solution = Solution::new(instance.clone(), 10);

    clarke_and_wright(&instance, &mut solution, 1.0, 100);

    let reference = solution.clone();
    solution.apply_undo_list1();

    assert!(solution == reference);
}
