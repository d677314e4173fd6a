use hotseat_battleship::view::{self, DEFAULT_CELL};
use hotseat_battleship::{
    AnimationTiming, Canvas, CellDisplay, ControlAction, Coord, GameConfig, GameEngine, GamePhase,
    Orchestrator, RecordingHost, Rgb, SideId, Sound,
};

const FAST: AnimationTiming = AnimationTiming {
    projectile_step: 1,
    blast_step: 1,
    result_hold: 1,
};

fn session(config: &GameConfig) -> Orchestrator<RecordingHost> {
    let engine = GameEngine::new(config).unwrap();
    let host = RecordingHost::new(view::canvas_bounds(engine.bounds()));
    Orchestrator::new(engine, host, FAST)
}

fn panel(slot: i32) -> Coord {
    Coord::new(slot, GameConfig::default().height)
}

fn drain(o: &mut Orchestrator<RecordingHost>) -> usize {
    let mut pulses = 0;
    while o.is_animating() {
        o.pulse();
        pulses += 1;
        assert!(pulses < 1000, "animation never finished");
    }
    pulses
}

fn to_attacking(o: &mut Orchestrator<RecordingHost>) {
    o.control_action(ControlAction::Submit);
    o.control_action(ControlAction::Submit);
    assert_eq!(o.engine().phase(), GamePhase::Attacking(SideId::A));
}

fn assert_canvas_matches_engine(o: &Orchestrator<RecordingHost>) {
    for at in o.engine().bounds().iter() {
        assert_eq!(
            o.host().cell_display(at),
            view::cell_display(o.engine(), at),
            "cell {}",
            at
        );
    }
}

#[test]
fn test_initial_paint() {
    let o = session(&GameConfig::default());
    assert!(o.input_active());
    assert!(!o.is_animating());
    assert_canvas_matches_engine(&o);
    assert_eq!(o.host().cell_display(panel(7)).glyph, '✔');
    assert_eq!(o.host().cell_display(panel(0)).glyph, '↻');
    assert_eq!(o.host().cell_display(panel(6)).glyph, 'A');
    assert_eq!(o.host().cell_display(Coord::new(0, 0)), CellDisplay::new(Rgb::GRAY, Rgb::GRAY, '•'));
    assert_eq!(o.host().cell_display(Coord::new(5, 5)), DEFAULT_CELL);
}

#[test]
fn test_select_and_shift_through_panel() {
    let mut o = session(&GameConfig::default());
    o.pointer_select(Coord::new(1, 0));
    assert_eq!(o.host().sounds(), &[Sound::Select]);
    let selected = Rgb::GRAY.contrasting();
    assert_eq!(o.host().cell_display(Coord::new(0, 0)), CellDisplay::new(selected, selected, '•'));
    assert_eq!(o.host().cell_display(Coord::new(1, 0)), CellDisplay::new(selected, selected, ' '));

    o.pointer_select(panel(ControlAction::MoveRight.panel_slot()));
    assert_eq!(o.host().sounds(), &[Sound::Select, Sound::Shift]);
    assert_eq!(
        o.engine().current_side().ship(o.engine().selected_ship().unwrap()).map(|s| s.anchor()),
        Some(Coord::new(1, 0))
    );
    assert_canvas_matches_engine(&o);
}

#[test]
fn test_rejected_actions_are_silent() {
    let mut o = session(&GameConfig::default());
    // nothing selected, empty water, the player slot and an unused slot
    o.control_action(ControlAction::RotateCw);
    o.pointer_select(Coord::new(7, 7));
    o.pointer_select(panel(6));
    o.pointer_select(panel(10));
    o.pointer_select(Coord::new(-1, 3));
    assert!(o.host().sounds().is_empty());
    assert_eq!(o.engine().submit_count(), 0);
    // blocked move
    o.pointer_select(Coord::new(0, 0));
    o.control_action(ControlAction::MoveUp);
    assert_eq!(o.host().sounds(), &[Sound::Select]);
}

#[test]
fn test_placement_submit_repaints_for_next_side() {
    let mut o = session(&GameConfig::default());
    o.pointer_select(Coord::new(0, 0));
    o.control_action(ControlAction::MoveRight);
    o.pointer_select(panel(7));
    assert_eq!(o.engine().phase(), GamePhase::Placing(SideId::B));
    assert_eq!(o.host().cell_display(panel(6)).glyph, 'B');
    // B's untouched fleet is shown, unselected
    assert_eq!(o.host().cell_display(Coord::new(0, 0)), CellDisplay::new(Rgb::GRAY, Rgb::GRAY, '•'));
    assert_eq!(o.host().cell_display(Coord::new(2, 0)), DEFAULT_CELL);
    assert_canvas_matches_engine(&o);
}

#[test]
fn test_target_highlight_moves() {
    let mut o = session(&GameConfig::default());
    to_attacking(&mut o);
    // opponent fleet is hidden
    assert_eq!(o.host().cell_display(Coord::new(0, 0)), DEFAULT_CELL);
    o.pointer_select(Coord::new(5, 5));
    assert_eq!(o.host().cell_display(Coord::new(5, 5)).fill, view::target_highlight());
    o.pointer_select(Coord::new(6, 6));
    assert_eq!(o.host().cell_display(Coord::new(5, 5)), DEFAULT_CELL);
    assert_eq!(o.host().cell_display(Coord::new(6, 6)).fill, view::target_highlight());
    assert_eq!(o.host().sounds(), &[Sound::Select, Sound::Select]);
}

#[test]
fn test_input_gated_during_attack() {
    let mut o = session(&GameConfig::default());
    to_attacking(&mut o);
    o.pointer_select(Coord::new(5, 5));
    o.control_action(ControlAction::Submit);
    assert!(o.is_animating());

    o.pulse();
    assert!(!o.input_active());
    let sounds = o.host().sounds().len();
    o.pointer_select(Coord::new(7, 7));
    o.control_action(ControlAction::Submit);
    o.pointer_select(panel(7));
    assert_eq!(o.host().sounds().len(), sounds);
    assert_eq!(o.engine().phase(), GamePhase::Attacking(SideId::A));
    assert!(o.engine().turn_resolved());

    drain(&mut o);
    assert!(o.input_active());
    assert_eq!(o.engine().phase(), GamePhase::Attacking(SideId::B));
    assert!(o.host().sounds().contains(&Sound::Launch));
    assert!(o.host().sounds().contains(&Sound::Splash));
    assert!(o.host().announcements().is_empty());
    assert_eq!(o.host().cell_display(panel(6)).glyph, 'B');
    assert_canvas_matches_engine(&o);
}

#[test]
fn test_attack_animation_length() {
    let mut o = session(&GameConfig::default());
    to_attacking(&mut o);
    o.pointer_select(Coord::new(5, 5));
    o.control_action(ControlAction::Submit);
    // 7 projectile frames, 2 blast rings, the hold, then the hand-over
    assert_eq!(drain(&mut o), 11);
}

#[test]
fn test_victory_announced_once() {
    let config = GameConfig {
        ship_lengths: vec![1],
        ..GameConfig::default()
    };
    let mut o = session(&config);
    to_attacking(&mut o);
    o.pointer_select(Coord::new(0, 0));
    o.control_action(ControlAction::Submit);
    drain(&mut o);

    assert_eq!(o.engine().winner(), Some(SideId::A));
    assert_eq!(o.host().announcements(), &["A won!!!".to_string()]);
    let victories = o.host().sounds().iter().filter(|s| **s == Sound::Victory).count();
    assert_eq!(victories, 1);
    assert!(o.host().sounds().contains(&Sound::Sunk));
    assert!(o.input_active());
    assert_eq!(o.host().cell_display(panel(6)).glyph, 'A');
    assert_eq!(o.host().cell_display(Coord::new(0, 0)).fill, view::SUNK_COLOR);

    let sounds = o.host().sounds().len();
    o.pointer_select(Coord::new(3, 3));
    o.control_action(ControlAction::Submit);
    o.control_action(ControlAction::MoveDown);
    for _ in 0..10 {
        o.pulse();
    }
    assert!(!o.is_animating());
    assert_eq!(o.host().sounds().len(), sounds);
    assert_eq!(o.host().announcements().len(), 1);
    assert_eq!(o.engine().phase(), GamePhase::End { winner: SideId::A });
}

#[test]
fn test_hit_marks_persist_for_attacker() {
    let mut o = session(&GameConfig::default());
    to_attacking(&mut o);
    o.pointer_select(Coord::new(0, 0));
    o.control_action(ControlAction::Submit);
    drain(&mut o);
    // B misses
    o.pointer_select(Coord::new(9, 9));
    o.control_action(ControlAction::Submit);
    drain(&mut o);
    assert_eq!(o.engine().phase(), GamePhase::Attacking(SideId::A));
    assert_eq!(o.host().cell_display(Coord::new(0, 0)).fill, view::HIT_COLOR);
    assert_eq!(o.host().cell_display(Coord::new(9, 9)), DEFAULT_CELL);
    assert_canvas_matches_engine(&o);
}
