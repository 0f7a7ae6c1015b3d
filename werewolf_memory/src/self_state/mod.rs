//! Self State - the assistant's own identity, relationships and reasoning trail.

mod entries;
mod state;

pub use entries::*;
pub use state::*;
