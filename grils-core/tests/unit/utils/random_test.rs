use super::*;

#[test]
fn can_reproduce_sequences_per_seed() {
    let first = DefaultRandom::new(42);
    let second = DefaultRandom::new(42);

    let draws = |random: &DefaultRandom| -> Vec<i32> { (0..32).map(|_| random.uniform_int(0, 1000)).collect() };

    assert_eq!(draws(&first), draws(&second));
}

#[test]
fn can_respect_uniform_int_bounds() {
    let random = DefaultRandom::new(0);

    for _ in 0..256 {
        let value = random.uniform_int(3, 7);
        assert!((3..=7).contains(&value));
    }

    assert_eq!(random.uniform_int(5, 5), 5);
}

#[test]
fn can_respect_uniform_real_bounds() {
    let random = DefaultRandom::new(0);

    for _ in 0..256 {
        let value = random.uniform_real(0.25, 0.75);
        assert!((0.25..0.75).contains(&value));
    }

    assert_eq!(random.uniform_real(1.5, 1.5), 1.5);
}

#[test]
fn can_shuffle_deterministically() {
    let random = DefaultRandom::new(7);
    let other = DefaultRandom::new(7);

    let mut first: Vec<_> = (0..20).collect();
    let mut second: Vec<_> = (0..20).collect();

    random.shuffle(&mut first);
    other.shuffle(&mut second);

    assert_eq!(first, second);

    let mut sorted = first.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..20).collect::<Vec<_>>());
}
