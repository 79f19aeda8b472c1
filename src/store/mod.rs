//! Durable storage for a [`Roster`].
//!
//! [`RosterStore`] is the seam between the session and the backing medium.
//! [`CsvStore`] keeps the roster in a single denormalized CSV file (one row per
//! grade, identity repeated). [`MemoryStore`] keeps it in memory.

mod csv_file;
mod memory;
mod row;

pub use csv_file::{CsvStore, LoadReport};
pub use memory::MemoryStore;
pub use row::{HEADER, RowOutcome, SkipReason};

use crate::error::Result;
use crate::roster::Roster;

/// Loads and saves whole rosters. Every save replaces the previous state.
pub trait RosterStore {
    fn load(&self) -> Result<Roster>;
    fn save(&self, roster: &Roster) -> Result<()>;
}
