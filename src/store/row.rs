//! Row shapes of the persisted CSV file.

use serde::{Deserialize, Serialize};

use crate::roster::Roster;
use crate::student::StudentId;

pub const HEADER: [&str; 6] = ["ID", "Name", "Subject", "Score", "Credits", "StudyHours"];

/// A row as written. Grade fields are `None` on the placeholder row of a
/// student who has no grades yet.
#[derive(Debug, Serialize)]
pub(crate) struct PersistedRow<'a> {
    pub(crate) id: StudentId,
    pub(crate) name: &'a str,
    pub(crate) subject: Option<&'a str>,
    pub(crate) score: Option<f64>,
    pub(crate) credits: Option<f64>,
    pub(crate) study_hours: Option<f64>,
}

/// A row as read, before any numeric parsing. Older files have no
/// `StudyHours` column.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRow {
    #[serde(rename = "ID", default)]
    pub(crate) id: String,
    #[serde(rename = "Name", default)]
    pub(crate) name: String,
    #[serde(rename = "Subject", default)]
    pub(crate) subject: String,
    #[serde(rename = "Score", default)]
    pub(crate) score: String,
    #[serde(rename = "Credits", default)]
    pub(crate) credits: String,
    #[serde(rename = "StudyHours", default)]
    pub(crate) study_hours: Option<String>,
}

/// Why a row was dropped during load.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    Unreadable(String),
    BadId(String),
    BadScore(String),
    BadCredits(String),
    BadStudyHours(String),
}

/// What loading a single row did to the roster.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Identity only; every grade field was blank.
    Registered(StudentId),
    /// A grade was appended to this student.
    Graded(StudentId),
    Skipped { line: u64, reason: SkipReason },
}

impl RowOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RowOutcome::Skipped { .. })
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl RawRow {
    /// Applies this row to `roster`.
    ///
    /// The student is registered as soon as the id parses, so a row whose
    /// grade fields are malformed still leaves its identity behind. Only a row
    /// with every grade field blank is a bare registration; a grade with an
    /// empty subject is still a grade.
    pub(crate) fn apply(self, roster: &mut Roster, line: u64) -> RowOutcome {
        let skipped = |reason| RowOutcome::Skipped { line, reason };

        let id = match self.id.trim().parse::<StudentId>() {
            Ok(id) if id > 0 => id,
            _ => return skipped(SkipReason::BadId(self.id)),
        };

        let student = roster.entry_or_register(id, self.name);

        let study_hours = self
            .study_hours
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty());

        if self.subject.trim().is_empty()
            && self.score.trim().is_empty()
            && self.credits.trim().is_empty()
            && study_hours.is_none()
        {
            return RowOutcome::Registered(id);
        }

        let Some(score) = parse_number(&self.score) else {
            return skipped(SkipReason::BadScore(self.score));
        };
        let Some(credits) = parse_number(&self.credits) else {
            return skipped(SkipReason::BadCredits(self.credits));
        };
        let study_hours = match study_hours {
            None => None,
            Some(raw) => match parse_number(raw) {
                Some(hours) => Some(hours),
                None => return skipped(SkipReason::BadStudyHours(raw.to_string())),
            },
        };

        student.add_grade(self.subject, score, credits, study_hours);
        RowOutcome::Graded(id)
    }
}
