use super::*;

#[derive(Clone, Copy)]
struct Slot {
    key: f64,
    heap_index: i32,
}

impl Slot {
    fn new(key: f64) -> Self {
        Self { key, heap_index: UNHEAPED }
    }
}

impl HeapSlot for Slot {
    fn heap_index(&self) -> i32 {
        self.heap_index
    }

    fn set_heap_index(&mut self, index: i32) {
        self.heap_index = index;
    }

    fn heap_key(&self) -> f64 {
        self.key
    }

    fn set_heap_key(&mut self, key: f64) {
        self.key = key;
    }
}

fn drain(heap: &mut IndexedBinaryHeap, items: &mut [Slot]) -> Vec<f64> {
    std::iter::from_fn(|| heap.pop(items).map(|e| items[e as usize].key)).collect()
}

#[test]
fn can_pop_in_key_order() {
    let mut items: Vec<_> = [5., 1., 4., 2., 3., 0.].iter().map(|&k| Slot::new(k)).collect();
    let mut heap = IndexedBinaryHeap::new();

    (0..items.len()).for_each(|e| heap.insert(&mut items, e as u32));

    assert_eq!(drain(&mut heap, &mut items), vec![0., 1., 2., 3., 4., 5.]);
}

#[test]
fn can_track_heap_indices() {
    let mut items: Vec<_> = [3., 1., 2.].iter().map(|&k| Slot::new(k)).collect();
    let mut heap = IndexedBinaryHeap::new();

    (0..items.len()).for_each(|e| heap.insert(&mut items, e as u32));

    for hindex in 0..heap.len() {
        let element = heap.spy(hindex);
        assert_eq!(items[element as usize].heap_index, hindex as i32);
    }

    let head = heap.pop(&mut items).unwrap();
    assert_eq!(items[head as usize].heap_index, UNHEAPED);
}

#[test]
fn can_remove_arbitrary_element() {
    let mut items: Vec<_> = [4., 2., 7., 1.].iter().map(|&k| Slot::new(k)).collect();
    let mut heap = IndexedBinaryHeap::new();

    (0..items.len()).for_each(|e| heap.insert(&mut items, e as u32));

    // Remove the element with key 2.
    let remove_index = items[1].heap_index;
    heap.remove(&mut items, remove_index);
    assert_eq!(items[1].heap_index, UNHEAPED);

    assert_eq!(drain(&mut heap, &mut items), vec![1., 4., 7.]);
}

#[test]
fn can_change_key_both_directions() {
    let mut items: Vec<_> = [4., 2., 7., 1.].iter().map(|&k| Slot::new(k)).collect();
    let mut heap = IndexedBinaryHeap::new();

    (0..items.len()).for_each(|e| heap.insert(&mut items, e as u32));

    let key2_index = items[2].heap_index;
    heap.change_key(&mut items, key2_index, 0.);
    let key3_index = items[3].heap_index;
    heap.change_key(&mut items, key3_index, 9.);

    assert_eq!(drain(&mut heap, &mut items), vec![0., 2., 4., 9.]);
}

#[test]
fn can_reset_and_reuse() {
    let mut items: Vec<_> = [4., 2.].iter().map(|&k| Slot::new(k)).collect();
    let mut heap = IndexedBinaryHeap::new();

    (0..items.len()).for_each(|e| heap.insert(&mut items, e as u32));
    heap.reset(&mut items);

    assert!(heap.is_empty());
    assert!(items.iter().all(|slot| slot.heap_index == UNHEAPED));

    heap.insert(&mut items, 0);
    assert_eq!(drain(&mut heap, &mut items), vec![4.]);
}
