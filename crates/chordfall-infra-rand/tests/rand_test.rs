use chordfall_infra_rand::RandRandom;
use chordfall_ports::RandomSource;
use pretty_assertions::assert_eq;

#[test]
fn draws_stay_in_range() {
    let mut rng = RandRandom::from_entropy();
    for len in 1..50 {
        for _ in 0..20 {
            assert!(rng.pick(len) < len);
        }
    }
    assert_eq!(rng.pick(0), 0);
}

#[test]
fn same_seed_replays_same_draws() {
    let mut a = RandRandom::seeded(7);
    let mut b = RandRandom::seeded(7);

    let first: Vec<usize> = (0..32).map(|_| a.pick(12)).collect();
    let second: Vec<usize> = (0..32).map(|_| b.pick(12)).collect();

    assert_eq!(first, second);
}
