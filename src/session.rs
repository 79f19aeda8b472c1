//! Write-through editing of a roster.
//!
//! A [`Session`] owns the roster for the lifetime of a driver (CLI run, form
//! session, ...) and persists the full state after every successful mutation.

use tracing::{debug, info};

use crate::error::Result;
use crate::roster::Roster;
use crate::store::RosterStore;
use crate::student::StudentId;

pub struct Session<S: RosterStore> {
    roster: Roster,
    store: S,
}

impl<S: RosterStore> Session<S> {
    /// Loads the current roster from `store`.
    pub fn open(store: S) -> Result<Self> {
        let roster = store.load()?;
        debug!(students = roster.len(), "Session opened");
        Ok(Self { roster, store })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a student and saves. Nothing is saved if the id is taken.
    pub fn add_student(&mut self, id: StudentId, name: impl Into<String>) -> Result<()> {
        self.roster.add_student(id, name)?;
        self.store.save(&self.roster)?;
        info!(id, "Student added");
        Ok(())
    }

    /// Records a grade and saves. Nothing is saved if the id is unknown.
    pub fn add_grade(
        &mut self,
        id: StudentId,
        subject: impl Into<String>,
        score: f64,
        credits: f64,
        study_hours: impl Into<Option<f64>>,
    ) -> Result<()> {
        self.roster
            .add_grade(id, subject, score, credits, study_hours)?;
        self.store.save(&self.roster)?;
        info!(id, "Grade saved");
        Ok(())
    }
}
