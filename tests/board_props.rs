use hotseat_battleship::{Bounds, CellState, Coord, Direction, Side, SideId, ShipId};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

const SIZE: i32 = 10;
const FLEET: [usize; 4] = [2, 3, 3, 4];

fn random_side(seed: u64) -> Side {
    let mut rng = SmallRng::seed_from_u64(seed);
    Side::scattered(SideId::A, Bounds::new(SIZE, SIZE), &FLEET, &mut rng).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scattered_layout_is_consistent(seed in any::<u64>()) {
        let side = random_side(seed);
        prop_assert_eq!(side.validate(), Ok(()));
        prop_assert_eq!(side.board().count(CellState::Occupied), FLEET.iter().sum::<usize>());
        for ship in side.ships() {
            let cells = ship.occupied_cells();
            prop_assert_eq!(cells.len(), ship.len());
            for c in cells {
                prop_assert!(side.board().bounds().contains(c));
                prop_assert_eq!(side.ship_at(c), Some(ship.id()));
            }
        }
    }

    #[test]
    fn edits_preserve_consistency(seed in any::<u64>(), steps in 1..40usize) {
        let mut side = random_side(seed);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
        for _ in 0..steps {
            let ship = ShipId(rng.random_range(0..FLEET.len()));
            let before = side.clone();
            let res = if rng.random() {
                side.try_rotate(ship, rng.random())
            } else {
                side.try_shift(ship, Direction::ALL[rng.random_range(0..4)])
            };
            if res.is_err() {
                prop_assert_eq!(&side, &before);
            }
            prop_assert_eq!(side.validate(), Ok(()));
        }
    }

    #[test]
    fn attack_is_idempotent(seed in any::<u64>(), x in 0..SIZE, y in 0..SIZE) {
        let mut side = random_side(seed);
        let c = Coord::new(x, y);
        let before = side.clone();
        prop_assert!(side.receive_attack(c).is_ok());
        let after = side.clone();
        prop_assert!(side.receive_attack(c).is_err());
        prop_assert_eq!(&side, &after);
        prop_assert_ne!(&before, &after);
        prop_assert_eq!(side.validate(), Ok(()));
    }
}
