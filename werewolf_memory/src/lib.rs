//! # Werewolf Memory
//!
//! Everything one player remembers during a single game of Werewolf. The
//! crate records observations and answers read-only questions about them;
//! deciding what to say or whom to vote for is left to the caller.
//!
//! ## Core Components
//!
//! - **player_ledger**: Claims, votes, deaths and suspicion for every player
//! - **self_state**: The assistant's own role, alliances, enemies and reasoning trail
//! - **query**: Read-only façade, snapshots and prompt summaries over both stores
//! - **assistant**: Owns both stores, the clock and the phase tracker for one session
//!
//! ## Design Philosophy
//!
//! - **Append-Only**: No operation removes history; dead players keep their claims
//! - **Forgiving Writes**: Mutators create unknown players; only pure reads fail
//! - **Owned Snapshots**: Exports are deep copies, unaffected by later mutation

pub mod assistant;
pub mod config;
pub mod error;
pub mod player_ledger;
pub mod query;
pub mod self_state;

pub use assistant::*;
pub use config::*;
pub use error::*;
pub use player_ledger::*;
pub use query::*;
pub use self_state::*;
