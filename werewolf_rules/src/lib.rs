//! # Werewolf Rules
//!
//! Game vocabulary shared by everything that reasons about a Werewolf session:
//! roles, role actions, day/night phases, and the clock used to timestamp events.
//! This crate holds no memory or decision logic.

pub mod clock;
pub mod phase;
pub mod roles;

pub use clock::*;
pub use phase::*;
pub use roles::*;
