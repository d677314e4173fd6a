use hotseat_battleship::{
    Coord, Direction, GameConfig, GameEngine, GamePhase, SideId, SubmitOutcome,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn small_config() -> GameConfig {
    GameConfig {
        width: 6,
        height: 6,
        ship_lengths: vec![2, 3],
        ..GameConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_play_keeps_invariants(seed in any::<u64>(), steps in 1..400usize) {
        let config = small_config();
        let bounds = config.bounds();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut e = GameEngine::with_random_layout(&config, &mut rng).unwrap();
        let mut last_count = 0;
        for _ in 0..steps {
            let at = Coord::new(rng.random_range(-1..=bounds.width), rng.random_range(-1..=bounds.height));
            let phase_before = e.phase();
            let _ = match rng.random_range(0..5) {
                0 => e.select(at).map(|_| ()),
                1 => e.rotate(rng.random()),
                2 => e.shift(Direction::ALL[rng.random_range(0..4)]),
                3 => e.submit().map(|_| ()),
                _ => e.end_turn().map(|_| ()),
            };
            prop_assert_eq!(e.validate(), Ok(()));
            prop_assert!(e.submit_count() >= last_count);
            last_count = e.submit_count();
            if let GamePhase::End { .. } = phase_before {
                prop_assert_eq!(e.phase(), phase_before);
            }
            if let GamePhase::End { winner } = e.phase() {
                prop_assert!(e.side(winner.other()).all_sunk());
            }
            if let Some(active) = e.phase().active_side() {
                prop_assert_eq!(e.current_side().id(), active);
            }
        }
    }

    #[test]
    fn placement_never_changes_opponent(seed in any::<u64>(), steps in 1..100usize) {
        let config = small_config();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut e = GameEngine::with_random_layout(&config, &mut rng).unwrap();
        let b_before = e.side(SideId::B).clone();
        for _ in 0..steps {
            let at = Coord::new(rng.random_range(0..6), rng.random_range(0..6));
            let _ = e.select(at);
            let _ = if rng.random() {
                e.rotate(rng.random())
            } else {
                e.shift(Direction::ALL[rng.random_range(0..4)])
            };
        }
        prop_assert_eq!(e.side(SideId::B), &b_before);
        prop_assert_eq!(e.phase(), GamePhase::Placing(SideId::A));
    }

    #[test]
    fn attacker_wins_by_sinking_everything(seed in any::<u64>()) {
        let config = small_config();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut e = GameEngine::with_random_layout(&config, &mut rng).unwrap();
        e.submit().unwrap();
        e.submit().unwrap();
        let targets: Vec<Coord> = e.side(SideId::B).ships().iter().flat_map(|s| s.occupied_cells()).collect();
        let spare: Vec<Coord> = config
            .bounds()
            .iter()
            .filter(|c| e.side(SideId::A).ship_at(*c).is_none())
            .collect();
        let mut spare = spare.into_iter();
        let mut winner = None;
        for t in targets {
            e.select(t).unwrap();
            if let SubmitOutcome::Attack(report) = e.submit().unwrap() {
                winner = report.winner;
            }
            if winner.is_some() {
                break;
            }
            e.end_turn().unwrap();
            // B answers into empty water
            let miss = spare.next().unwrap();
            e.select(miss).unwrap();
            e.submit().unwrap();
            e.end_turn().unwrap();
        }
        prop_assert_eq!(winner, Some(SideId::A));
        prop_assert_eq!(e.winner(), Some(SideId::A));
    }
}
