#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod animation;
mod board;
mod common;
mod config;
mod controls;
mod coord;
mod display;
pub mod frame;
pub mod fx;
mod game;
mod host;
#[cfg(feature = "std")]
mod logging;
mod orchestrator;
pub mod prelude;
mod ship;
#[cfg(feature = "std")]
pub mod term;
pub mod view;

pub use animation::{AnimationQueue, Effect, Step};
pub use board::*;
pub use common::*;
pub use config::*;
pub use controls::*;
pub use coord::*;
pub use display::*;
pub use frame::Frame;
pub use game::*;
pub use host::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use orchestrator::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use term::TerminalHost;
