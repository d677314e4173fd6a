use hotseat_battleship::{Bounds, Canvas, CellDisplay, Coord, DisplayPatch, Frame, MemoryCanvas, Rgb};
use proptest::prelude::*;

const PALETTE: [Rgb; 5] = [Rgb::RED, Rgb::BLUE, Rgb::YELLOW, Rgb::BLACK, Rgb::CYAN];

fn canvas() -> MemoryCanvas {
    let mut canvas = MemoryCanvas::new(Bounds::new(4, 4));
    canvas.paint(Coord::new(1, 1), CellDisplay::new(Rgb::GRAY, Rgb::BLACK, 'a'));
    canvas
}

fn patch_strategy() -> impl Strategy<Value = DisplayPatch> {
    (
        proptest::option::of(0..PALETTE.len()),
        proptest::option::of(0..PALETTE.len()),
        proptest::option::of(proptest::char::range('a', 'z')),
    )
        .prop_map(|(fill, border, glyph)| DisplayPatch {
            fill: fill.map(|i| PALETTE[i]),
            border: border.map(|i| PALETTE[i]),
            glyph,
        })
}

#[test]
fn test_play_patches_only_given_fields() {
    let mut canvas = canvas();
    let at = Coord::new(1, 1);
    let mut frame = Frame::new().with(at, DisplayPatch::none().glyph('*'));
    frame.play(&mut canvas);
    assert_eq!(canvas.cell_display(at), CellDisplay::new(Rgb::GRAY, Rgb::BLACK, '*'));
    assert!(frame.is_captured());
    assert!(frame.restore(&mut canvas));
    assert_eq!(canvas.cell_display(at), CellDisplay::new(Rgb::GRAY, Rgb::BLACK, 'a'));
}

#[test]
fn test_restore_before_play_is_noop() {
    let mut canvas = canvas();
    let before = canvas.clone();
    let frame = Frame::new().with(Coord::new(0, 0), DisplayPatch::none().fill(Rgb::RED));
    assert!(!frame.restore(&mut canvas));
    assert_eq!(canvas, before);
    assert_eq!(frame.invert(), None);
}

#[test]
fn test_capture_is_lazy_and_kept() {
    let mut canvas = canvas();
    let at = Coord::new(2, 2);
    let mut frame = Frame::new().with(at, DisplayPatch::none().fill(Rgb::RED));
    assert!(!frame.is_captured());
    frame.play(&mut canvas);
    // a second play keeps the first snapshot
    frame.play(&mut canvas);
    assert!(frame.restore(&mut canvas));
    assert_eq!(canvas.cell_display(at), CellDisplay::default());
}

#[test]
fn test_restore_twice_is_stable() {
    let mut canvas = canvas();
    let before = canvas.clone();
    let mut frame = Frame::new().with(Coord::new(1, 1), DisplayPatch::none().fill(Rgb::RED));
    frame.play(&mut canvas);
    frame.restore(&mut canvas);
    frame.restore(&mut canvas);
    assert_eq!(canvas, before);
}

#[test]
fn test_insert_keeps_snapshot() {
    let mut canvas = canvas();
    let mut frame = Frame::new().with(Coord::new(0, 0), DisplayPatch::none().glyph('x'));
    frame.recapture(&canvas);
    assert!(frame.is_captured());
    frame.insert(Coord::new(0, 0), DisplayPatch::none().glyph('y'));
    frame.insert(Coord::new(3, 3), DisplayPatch::none().glyph('z'));
    assert!(frame.is_captured());
    assert_eq!(frame.underlay().map(|u| u.len()), Some(1));
    frame.play(&mut canvas);
    assert_eq!(frame.underlay().map(|u| u.len()), Some(2));
}

#[test]
fn test_insert_while_on_screen_still_restores() {
    let mut canvas = canvas();
    let before = canvas.clone();
    let a = Coord::new(0, 0);
    let b = Coord::new(2, 1);
    let mut frame = Frame::new().with(a, DisplayPatch::none().glyph('a').fill(Rgb::RED));
    frame.play(&mut canvas);
    frame.insert(b, DisplayPatch::none().glyph('b'));
    frame.play(&mut canvas);
    assert_eq!(canvas.cell_display(b).glyph, 'b');
    assert!(frame.restore(&mut canvas));
    assert_eq!(canvas, before);
    assert_eq!(canvas.cell_display(a), CellDisplay::default());
}

#[test]
fn test_invert_swaps_layers() {
    let mut canvas = canvas();
    let before = canvas.clone();
    let mut frame = Frame::new().with(Coord::new(1, 1), DisplayPatch::none().fill(Rgb::RED));
    frame.play(&mut canvas);
    let after = canvas.clone();
    let mut inverse = frame.invert().unwrap();
    assert_eq!(inverse.overlay(), frame.underlay().unwrap());
    assert_eq!(inverse.underlay(), Some(frame.overlay()));
    inverse.play(&mut canvas);
    assert_eq!(canvas, before);
    // the original frame still works afterwards
    frame.play(&mut canvas);
    assert_eq!(canvas, after);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn play_then_restore_round_trips(
        cells in proptest::collection::btree_map((0..4i32, 0..4i32), patch_strategy(), 0..10),
        background in proptest::collection::vec(patch_strategy(), 16),
    ) {
        let mut canvas = MemoryCanvas::new(Bounds::new(4, 4));
        for (i, patch) in background.into_iter().enumerate() {
            canvas.set_cell_display(Coord::new(i as i32 % 4, i as i32 / 4), patch);
        }
        let before = canvas.clone();
        let mut frame = Frame::new();
        for ((x, y), patch) in cells {
            frame.insert(Coord::new(x, y), patch);
        }
        frame.play(&mut canvas);
        prop_assert!(frame.restore(&mut canvas));
        prop_assert_eq!(canvas, before);
    }
}
