use super::*;

#[test]
fn can_round_trip_identifiers() {
    let mut stack = FixedSizeStack::new(3, |index| index as i32 + 1);

    assert_eq!(stack.len(), 3);
    assert_eq!(stack.get(), 1);
    assert_eq!(stack.get(), 2);
    assert_eq!(stack.len(), 1);

    stack.push(2);
    assert_eq!(stack.get(), 2);
    assert_eq!(stack.get(), 3);
    assert!(stack.is_empty());

    stack.push(3);
    assert!(!stack.is_empty());
    assert_eq!(stack.get(), 3);
}

#[test]
fn can_reset_to_initial_content() {
    let mut stack = FixedSizeStack::new(2, |index| index as i32);

    stack.get();
    stack.get();
    stack.reset(|index| index as i32);

    assert_eq!(stack.len(), 2);
    assert_eq!(stack.get(), 0);
}
