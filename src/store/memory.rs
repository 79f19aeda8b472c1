use std::cell::{Cell, RefCell};

use super::RosterStore;
use crate::error::Result;
use crate::roster::Roster;

/// Keeps the last saved roster in memory. Nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Roster>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already populated roster, as if it had been saved before.
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            saved: RefCell::new(roster),
            saves: Cell::new(0),
        }
    }

    /// Number of times [`RosterStore::save`] has been called.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl RosterStore for MemoryStore {
    fn load(&self) -> Result<Roster> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, roster: &Roster) -> Result<()> {
        *self.saved.borrow_mut() = roster.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
