//! Attack animation: projectile, blast, result hold and turn hand-over.

use alloc::format;
use alloc::vec::Vec;

use crate::animation::AnimationQueue;
use crate::board::AttackOutcome;
use crate::config::AnimationTiming;
use crate::coord::{Bounds, Coord};
use crate::display::{DisplayPatch, Rgb};
use crate::frame::Frame;
use crate::game::AttackReport;
use crate::host::{Host, Sound};
use crate::orchestrator::Table;

pub const PROJECTILE_GLYPH: char = '*';

/// One frame per projectile position, from the bottom row up to `target`.
pub fn projectile_path(target: Coord, grid: Bounds) -> Vec<Frame> {
    let patch = DisplayPatch::none().glyph(PROJECTILE_GLYPH).border(Rgb::YELLOW);
    (target.y..grid.height)
        .rev()
        .map(|y| Frame::new().with(Coord::new(target.x, y), patch))
        .collect()
}

fn ring_color(outcome: AttackOutcome, radius: i32) -> Rgb {
    match (outcome, radius) {
        (AttackOutcome::Miss, 0) => Rgb::CYAN,
        (AttackOutcome::Miss, _) => Rgb::BLUE,
        (AttackOutcome::Hit(_) | AttackOutcome::Sunk(_), 0) => Rgb::YELLOW,
        (AttackOutcome::Hit(_) | AttackOutcome::Sunk(_), 1) => Rgb::ORANGE,
        (AttackOutcome::Hit(_) | AttackOutcome::Sunk(_), _) => Rgb::RED,
    }
}

/// Blast radius: a splash for a miss, a wider blast for a hit.
pub fn blast_radius(outcome: AttackOutcome) -> i32 {
    match outcome {
        AttackOutcome::Miss => 1,
        AttackOutcome::Hit(_) | AttackOutcome::Sunk(_) => 2,
    }
}

/// Growing rings around `target`, one frame per radius, clipped to the grid.
pub fn blast_rings(target: Coord, outcome: AttackOutcome, grid: Bounds) -> Vec<Frame> {
    (0..=blast_radius(outcome))
        .map(|radius| {
            let patch = DisplayPatch::none().fill(ring_color(outcome, radius));
            let mut frame = Frame::new();
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let at = target.offset(dx, dy);
                    if grid.contains(at) && at.chebyshev(target) == radius {
                        frame.insert(at, patch);
                    }
                }
            }
            frame
        })
        .collect()
}

fn outcome_sound(outcome: AttackOutcome) -> Sound {
    match outcome {
        AttackOutcome::Miss => Sound::Splash,
        AttackOutcome::Hit(_) => Sound::Hit,
        AttackOutcome::Sunk(_) => Sound::Sunk,
    }
}

/// Build the timeline for a resolved attack. Input is blocked from the first
/// step until the last one, which also passes the turn unless the game ended.
pub fn attack_sequence<H: Host + 'static>(
    report: AttackReport,
    grid: Bounds,
    timing: AnimationTiming,
) -> AnimationQueue<Table<H>> {
    let mut queue = AnimationQueue::new();
    queue.push_effect(|t: &mut Table<H>| {
        t.set_input_active(false);
        t.host_mut().play_sound(Sound::Launch);
    });
    for frame in projectile_path(report.target, grid) {
        queue.push_frame(frame, timing.projectile_step, false);
    }
    for (i, frame) in blast_rings(report.target, report.outcome, grid).into_iter().enumerate() {
        // the first ring replaces the projectile, the rest layer on top
        queue.push_frame(frame, timing.blast_step, i > 0);
    }
    queue.push_effect(move |t: &mut Table<H>| {
        t.host_mut().play_sound(outcome_sound(report.outcome));
        t.repaint_grid();
        if let Some(winner) = report.winner {
            t.host_mut().play_sound(Sound::Victory);
            t.host_mut().announce_status(&format!("{} won!!!", winner));
        }
    });
    queue.wait(timing.result_hold);
    queue.push_effect(|t: &mut Table<H>| {
        if t.engine().winner().is_none() {
            if let Err(e) = t.engine_mut().end_turn() {
                log::warn!("turn hand-over failed: {}", e);
            }
        }
        t.repaint_all();
        t.set_input_active(true);
    });
    queue
}
