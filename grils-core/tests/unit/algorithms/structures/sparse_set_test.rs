use super::*;

#[test]
fn can_insert_and_deduplicate() {
    let mut set = SparseIntSet::new(10);

    set.insert(3);
    set.insert(7);
    set.insert(3);

    assert_eq!(set.elements(), &[3, 7]);
    assert!(set.contains(3));
    assert!(!set.contains(4));
    assert_eq!(set.len(), 2);
}

#[test]
fn can_clear_in_element_time() {
    let mut set = SparseIntSet::new(5);

    set.insert(0);
    set.insert(4);
    set.clear();

    assert!(set.is_empty());
    assert!(!set.contains(0));
    assert!(!set.contains(4));

    set.insert(4);
    assert_eq!(set.elements(), &[4]);
}
