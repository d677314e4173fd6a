//! Tick-driven sequencer of frames and effects.
//!
//! An [`AnimationQueue`] is advanced by one external pulse at a time. Effects
//! run synchronously and take no time; frames wait until their duration has
//! elapsed since the previous frame was played. A replacing frame
//! (`accumulate == false`) first restores the replacing frame before it, so
//! the display shows at most one replacing frame with any number of
//! accumulating frames layered on top. Cells painted by an accumulating frame
//! since the last replacing frame are left alone by that restore.

use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use core::fmt;

use crate::coord::Coord;
use crate::display::Canvas;
use crate::frame::Frame;

/// Zero-duration callback run against the animation context.
pub type Effect<C> = Box<dyn FnOnce(&mut C)>;

/// One entry of an animation timeline.
pub enum Step<C> {
    Frame {
        frame: Frame,
        /// Pulses to wait after the previous frame before playing this one.
        duration: u32,
        /// Layer over the previous frame instead of replacing it.
        accumulate: bool,
    },
    Effect(Effect<C>),
}

impl<C> fmt::Debug for Step<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Frame {
                frame,
                duration,
                accumulate,
            } => f
                .debug_struct("Frame")
                .field("cells", &frame.len())
                .field("duration", duration)
                .field("accumulate", accumulate)
                .finish(),
            Step::Effect(_) => f.write_str("Effect"),
        }
    }
}

enum Next {
    Done,
    Effect,
    Frame(u32),
}

/// Ordered steps plus playback position.
pub struct AnimationQueue<C> {
    steps: VecDeque<Step<C>>,
    index: usize,
    elapsed: u32,
    running: bool,
    replacing: Option<Frame>,
    /// Cells drawn by accumulating frames over `replacing`.
    layered: BTreeSet<Coord>,
}

impl<C: Canvas> AnimationQueue<C> {
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            index: 0,
            elapsed: 0,
            running: false,
            replacing: None,
            layered: BTreeSet::new(),
        }
    }

    pub fn push_frame(&mut self, frame: Frame, duration: u32, accumulate: bool) -> &mut Self {
        self.steps.push_back(Step::Frame {
            frame,
            duration,
            accumulate,
        });
        self
    }

    pub fn push_effect(&mut self, effect: impl FnOnce(&mut C) + 'static) -> &mut Self {
        self.steps.push_back(Step::Effect(Box::new(effect)));
        self
    }

    /// Delay the following steps by `ticks` pulses.
    pub fn wait(&mut self, ticks: u32) -> &mut Self {
        self.push_frame(Frame::new(), ticks, true)
    }

    /// Begin (or resume) processing on the next pulse.
    pub fn start(&mut self) {
        self.running = !self.steps.is_empty();
    }

    /// Halt on the next pulse. In-flight frames are left on screen.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns `true` when every step has been consumed.
    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps consumed so far.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Number of steps still queued.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Pulses counted since the last frame was played.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Advance by one pulse.
    pub fn pulse(&mut self, ctx: &mut C) {
        if !self.running {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        loop {
            let next = match self.steps.front() {
                None => Next::Done,
                Some(Step::Effect(_)) => Next::Effect,
                Some(Step::Frame { duration, .. }) => Next::Frame(*duration),
            };
            match next {
                Next::Done => {
                    self.running = false;
                    return;
                }
                Next::Effect => {
                    if let Some(Step::Effect(effect)) = self.steps.pop_front() {
                        self.index += 1;
                        effect(ctx);
                    }
                }
                Next::Frame(duration) => {
                    if self.elapsed < duration {
                        return;
                    }
                    if let Some(Step::Frame {
                        mut frame,
                        accumulate,
                        ..
                    }) = self.steps.pop_front()
                    {
                        if !accumulate {
                            if let Some(previous) = self.replacing.take() {
                                previous.restore_except(ctx, &self.layered);
                            }
                            self.layered.clear();
                        }
                        frame.play(ctx);
                        if accumulate {
                            self.layered.extend(frame.overlay().keys().copied());
                        } else {
                            self.replacing = Some(frame);
                        }
                        self.index += 1;
                        self.elapsed = 0;
                    }
                    if self.steps.is_empty() {
                        self.running = false;
                    }
                    return;
                }
            }
        }
    }
}

impl<C: Canvas> Default for AnimationQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for AnimationQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationQueue")
            .field("steps", &self.steps)
            .field("index", &self.index)
            .field("elapsed", &self.elapsed)
            .field("running", &self.running)
            .finish()
    }
}
