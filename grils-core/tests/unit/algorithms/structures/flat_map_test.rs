use super::*;

#[test]
fn can_insert_contains_clear_set() {
    let mut set = FlatSet::new(8);

    assert!(set.insert(5));
    assert!(!set.insert(5));
    assert!(set.insert(13));

    assert!(set.contains(5));
    assert!(set.contains(13));
    assert!(!set.contains(21));

    let mut values: Vec<_> = set.iter().collect();
    values.sort_unstable();
    assert_eq!(values, vec![5, 13]);

    set.clear();
    assert!(!set.contains(5));
}

#[test]
fn can_copy_set_contents() {
    let mut source = FlatSet::new(8);
    let mut target = FlatSet::new(8);

    source.insert(1);
    source.insert(2);
    target.insert(7);

    target.copy_from(&source);

    assert!(target.contains(1));
    assert!(target.contains(2));
    assert!(!target.contains(7));
}

#[test]
fn can_store_and_overwrite_map_values() {
    let mut map: FlatMap<i32> = FlatMap::new(8);

    map.set(4, 100);
    map.set(12, 200);
    map.set(4, 300);

    assert_eq!(map.get(4), Some(300));
    assert_eq!(map.get(12), Some(200));
    assert_eq!(map.get(20), None);

    map.clear();
    assert_eq!(map.get(4), None);
}

#[test]
fn can_handle_colliding_keys() {
    // All keys map to the same initial slot for a buffer of 16 entries.
    let mut map: FlatMap<i32> = FlatMap::new(8);

    map.set(3, 1);
    map.set(19, 2);
    map.set(35, 3);

    assert_eq!(map.get(3), Some(1));
    assert_eq!(map.get(19), Some(2));
    assert_eq!(map.get(35), Some(3));
}

#[test]
fn can_overwrite_matrix_rows() {
    let mut matrix = FlatSetMatrix::new(3, 8);

    matrix.set(0, 1);
    matrix.set(0, 2);
    matrix.set(2, 9);

    matrix.overwrite(0, 2);
    matrix.set(2, 3);

    assert!(matrix.is_set(2, 1));
    assert!(matrix.is_set(2, 2));
    assert!(matrix.is_set(2, 3));
    assert!(!matrix.is_set(2, 9));
    assert!(!matrix.is_set(0, 3));

    matrix.reset(0);
    assert!(!matrix.is_set(0, 1));
}
