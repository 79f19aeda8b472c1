use csv::{ReaderBuilder, WriterBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::RosterStore;
use super::row::{HEADER, PersistedRow, RawRow, RowOutcome, SkipReason};
use crate::error::Result;
use crate::roster::Roster;

/// Roster state held in a single CSV file.
///
/// Layout is one row per grade with the student's id and name repeated, plus
/// one placeholder row (blank grade fields) for each student with no grades.
/// Unrecorded study hours are written as a blank cell.
/// Saves rewrite the whole file in place; they are not atomic.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

/// A loaded roster together with what happened to every data row.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub roster: Roster,
    pub outcomes: Vec<RowOutcome>,
}

impl LoadReport {
    pub fn skipped(&self) -> impl Iterator<Item = &RowOutcome> {
        self.outcomes.iter().filter(|o| o.is_skipped())
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, keeping a per-row outcome instead of failing on bad rows.
    ///
    /// A missing file is the first-run state and yields an empty report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened or its header
    /// cannot be read.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load_report(&self) -> Result<LoadReport> {
        if !self.path.exists() {
            info!("Records file not found, starting with an empty roster");
            return Ok(LoadReport::default());
        }

        let mut rdr = ReaderBuilder::new().flexible(true).from_path(&self.path)?;
        let headers = rdr.headers()?.clone();

        let mut report = LoadReport::default();

        for (index, result) in rdr.records().enumerate() {
            let outcome = match result {
                Ok(record) => {
                    let line = record.position().map_or(index as u64 + 2, |p| p.line());
                    match record.deserialize::<RawRow>(Some(&headers)) {
                        Ok(raw) => raw.apply(&mut report.roster, line),
                        Err(e) => RowOutcome::Skipped {
                            line,
                            reason: SkipReason::Unreadable(e.to_string()),
                        },
                    }
                }
                Err(e) => RowOutcome::Skipped {
                    line: e.position().map_or(index as u64 + 2, |p| p.line()),
                    reason: SkipReason::Unreadable(e.to_string()),
                },
            };

            if let RowOutcome::Skipped { line, reason } = &outcome {
                debug!(line, ?reason, "Skipping malformed row");
            }
            report.outcomes.push(outcome);
        }

        debug!(
            students = report.roster.len(),
            rows = report.outcomes.len(),
            "Records loaded"
        );

        Ok(report)
    }
}

impl RosterStore for CsvStore {
    fn load(&self) -> Result<Roster> {
        let report = self.load_report()?;

        let skipped = report.skipped_count();
        if skipped > 0 {
            warn!(path = %self.path.display(), skipped, "Skipped malformed rows while loading");
        }

        Ok(report.roster)
    }

    #[tracing::instrument(skip(self, roster), fields(path = %self.path.display(), students = roster.len()))]
    fn save(&self, roster: &Roster) -> Result<()> {
        // Header is written by hand so an empty roster still gets one.
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(HEADER)?;

        let mut rows = 0usize;
        for student in roster.students() {
            if student.grades().is_empty() {
                writer.serialize(PersistedRow {
                    id: student.id,
                    name: &student.name,
                    subject: None,
                    score: None,
                    credits: None,
                    study_hours: None,
                })?;
                rows += 1;
                continue;
            }

            for grade in student.grades() {
                writer.serialize(PersistedRow {
                    id: student.id,
                    name: &student.name,
                    subject: Some(&grade.subject),
                    score: Some(grade.score),
                    credits: Some(grade.credits),
                    study_hours: grade.study_hours,
                })?;
                rows += 1;
            }
        }

        writer.flush()?;
        debug!(rows, "Records saved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_roster() -> Roster {
        let mut roster = Roster::new();
        roster.add_student(2, "grace hopper").unwrap();
        roster.add_student(1, "ada lovelace").unwrap();
        roster.add_grade(1, "Math", 90.0, 3.0, 6.5).unwrap();
        roster.add_grade(1, "Poetry, Advanced", 71.0, 1.0, 0.0).unwrap();
        roster
    }

    #[test]
    fn test_load_missing_file_returns_empty_roster() {
        let path = temp_path("student_records_test_missing.csv");
        let _ = fs::remove_file(&path);

        let roster = CsvStore::new(&path).load().unwrap();
        assert!(roster.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = temp_path("student_records_test_round_trip.csv");
        let _ = fs::remove_file(&path);

        let store = CsvStore::new(&path);
        let roster = sample_roster();
        store.save(&roster).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.all_ids(), vec![2, 1]);
        assert_eq!(loaded, roster);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_round_trip_keeps_blank_subject_and_unrecorded_hours() {
        let path = temp_path("student_records_test_blank_fields.csv");
        let _ = fs::remove_file(&path);

        let mut roster = Roster::new();
        roster.add_student(5, "linus").unwrap();
        roster.add_grade(5, "", 77.0, 2.0, None).unwrap();
        roster.add_grade(5, "Math", 88.0, 3.0, 0.0).unwrap();

        let store = CsvStore::new(&path);
        store.save(&roster).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, roster);
        let grades = loaded.find_by_id(5).unwrap().grades();
        assert_eq!(grades[0].subject, "");
        assert_eq!(grades[0].study_hours, None);
        assert_eq!(grades[1].study_hours, Some(0.0));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_writes_placeholder_row_for_student_without_grades() {
        let path = temp_path("student_records_test_placeholder.csv");
        let _ = fs::remove_file(&path);

        CsvStore::new(&path).save(&sample_roster()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "ID,Name,Subject,Score,Credits,StudyHours");
        assert_eq!(lines[1], "2,grace hopper,,,,");
        assert!(lines[2].starts_with("1,ada lovelace,Math,"));
        assert!(lines[3].contains("\"Poetry, Advanced\""));
        assert_eq!(lines.len(), 4);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_empty_roster_writes_header_only() {
        let path = temp_path("student_records_test_empty.csv");
        let _ = fs::remove_file(&path);

        CsvStore::new(&path).save(&Roster::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "ID,Name,Subject,Score,Credits,StudyHours");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let path = temp_path("student_records_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        let store = CsvStore::new(&path);
        store.save(&sample_roster()).unwrap();

        let mut smaller = Roster::new();
        smaller.add_student(9, "linus").unwrap();
        store.save(&smaller).unwrap();

        assert_eq!(store.load().unwrap(), smaller);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_skips_non_numeric_score_only() {
        let path = temp_path("student_records_test_bad_score.csv");
        fs::write(
            &path,
            "ID,Name,Subject,Score,Credits,StudyHours\n\
             1,ada,Math,90,3,4\n\
             1,ada,Art,excellent,2,1\n\
             2,grace,Physics,85,4,\n",
        )
        .unwrap();

        let report = CsvStore::new(&path).load_report().unwrap();
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(
            report.skipped().next(),
            Some(&RowOutcome::Skipped {
                line: 3,
                reason: SkipReason::BadScore("excellent".to_string())
            })
        );

        let roster = report.roster;
        assert_eq!(roster.all_ids(), vec![1, 2]);
        assert_eq!(roster.find_by_id(1).unwrap().grades().len(), 1);
        assert_eq!(roster.find_by_id(2).unwrap().grades()[0].study_hours, None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_without_study_hours_column() {
        let path = temp_path("student_records_test_legacy.csv");
        fs::write(
            &path,
            "ID,Name,Subject,Score,Credits\n1,ada,Math,93,3\n1,ada,History,60.5,2\n",
        )
        .unwrap();

        let roster = CsvStore::new(&path).load().unwrap();
        let grades = roster.find_by_id(1).unwrap().grades();
        assert_eq!(grades.len(), 2);
        assert!(grades.iter().all(|g| g.study_hours.is_none()));
        assert_eq!(grades[1].score, 60.5);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_first_name_wins_for_repeated_id() {
        let path = temp_path("student_records_test_names.csv");
        fs::write(
            &path,
            "ID,Name,Subject,Score,Credits,StudyHours\n3,first,Math,80,3,2\n3,second,Art,70,1,1\n",
        )
        .unwrap();

        let roster = CsvStore::new(&path).load().unwrap();
        assert_eq!(roster.student_name(3), Some("first"));
        assert_eq!(roster.find_by_id(3).unwrap().grades().len(), 2);

        fs::remove_file(&path).unwrap();
    }
}
