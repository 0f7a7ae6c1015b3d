//! Player Ledger - everything observed about the players of a session.
//!
//! - **Claims**: what each player said, on which channel, and when
//! - **Votes**: per-player voting history plus a session-wide vote log
//! - **Suspicion**: an accumulating score used to rank suspects

mod claim;
mod ledger;
mod record;

pub use claim::*;
pub use ledger::*;
pub use record::*;
