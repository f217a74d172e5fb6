use super::*;

fn contents(cache: &LruCache) -> Vec<i32> {
    cache.iter().collect()
}

#[test]
fn can_keep_most_recent_first() {
    let mut cache = LruCache::new(4, 10);

    cache.insert(1);
    cache.insert(2);
    cache.insert(3);

    assert_eq!(contents(&cache), vec![3, 2, 1]);
}

#[test]
fn can_splay_reinserted_id_to_front() {
    let mut cache = LruCache::new(4, 10);

    cache.insert(1);
    cache.insert(2);
    cache.insert(3);
    cache.insert(1);

    assert_eq!(contents(&cache), vec![1, 3, 2]);
    assert_eq!(cache.len(), 3);
}

#[test]
fn can_evict_least_recent_at_capacity() {
    let mut cache = LruCache::new(2, 10);

    cache.insert(5);
    cache.insert(6);
    cache.insert(7);

    assert_eq!(contents(&cache), vec![7, 6]);
    assert_eq!(cache.len(), 2);
}

parameterized_test! {can_bound_size_by_capacity, capacity, {
    let mut cache = LruCache::new(capacity, 16);
    for id in 0..10 {
        cache.insert(id);
    }
    assert_eq!(cache.len(), capacity.min(10));
}}

can_bound_size_by_capacity! {
    case01_tiny: 1,
    case02_small: 4,
    case03_loose: 12,
}

#[test]
fn can_clear_all_entries() {
    let mut cache = LruCache::new(3, 10);

    cache.insert(0);
    cache.insert(9);
    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(contents(&cache), Vec::<i32>::new());

    cache.insert(4);
    assert_eq!(contents(&cache), vec![4]);
}
