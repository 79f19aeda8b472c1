//! Human- and machine-readable views of a roster.
//!
//! Supports the plain record listing and JSON export.

use anyhow::Result;
use serde::Serialize;

use crate::grade::letter_grade;
use crate::roster::Roster;
use crate::student::{GradeRecord, Student, StudentId};

/// A grade with its letter, as exported.
#[derive(Debug, Serialize)]
pub struct GradeSummary<'a> {
    #[serde(flatten)]
    pub record: &'a GradeRecord,
    pub letter: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StudentSummary<'a> {
    pub id: StudentId,
    pub name: &'a str,
    pub gpa: f64,
    pub total_credits: f64,
    pub grades: Vec<GradeSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RosterSummary<'a> {
    pub student_count: usize,
    pub students: Vec<StudentSummary<'a>>,
}

impl<'a> StudentSummary<'a> {
    pub fn from_student(student: &'a Student) -> Self {
        StudentSummary {
            id: student.id,
            name: &student.name,
            gpa: student.calculate_gpa(),
            total_credits: student.total_credits(),
            grades: student
                .grades()
                .iter()
                .map(|record| GradeSummary {
                    record,
                    letter: letter_grade(record.score),
                })
                .collect(),
        }
    }
}

impl<'a> RosterSummary<'a> {
    pub fn from_roster(roster: &'a Roster) -> Self {
        RosterSummary {
            student_count: roster.len(),
            students: roster.students().map(StudentSummary::from_student).collect(),
        }
    }
}

/// The record listing for one student: identity, GPA, then one line per grade.
pub fn student_lines(student: &Student) -> Vec<String> {
    let mut lines: Vec<String> = student.to_string().lines().map(str::to_string).collect();
    lines.push(format!("Overall GPA: {:.2}", student.calculate_gpa()));

    if student.grades().is_empty() {
        lines.push("No subjects yet".to_string());
    }

    for g in student.grades() {
        let hours = g
            .study_hours
            .map_or_else(|| "-".to_string(), |h| h.to_string());
        lines.push(format!(
            "  - {}: {} ({}) | Study Hours: {}",
            g.subject,
            g.score,
            letter_grade(g.score),
            hours
        ));
    }

    lines
}

/// The record listing for every student, separated by dashed rules.
pub fn record_lines(roster: &Roster) -> Vec<String> {
    let mut lines = Vec::new();
    for student in roster.students() {
        lines.extend(student_lines(student));
        lines.push("-".repeat(20));
    }
    lines
}

/// Serializes the roster, with GPA and letters, as pretty-printed JSON.
pub fn to_json(roster: &Roster) -> Result<String> {
    Ok(serde_json::to_string_pretty(&RosterSummary::from_roster(roster))?)
}
