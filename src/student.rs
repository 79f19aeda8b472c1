use serde::Serialize;
use std::fmt;

use crate::grade::grade_points;

pub type StudentId = u32;

/// One graded subject. Never edited after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRecord {
    pub subject: String,
    pub score: f64,
    pub credits: f64,
    /// `None` when the hours were never recorded.
    pub study_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    grades: Vec<GradeRecord>,
}

impl Student {
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Student {
            id,
            name: name.into(),
            grades: Vec::new(),
        }
    }

    /// Appends a grade. Range checks are the caller's job.
    pub fn add_grade(
        &mut self,
        subject: impl Into<String>,
        score: f64,
        credits: f64,
        study_hours: impl Into<Option<f64>>,
    ) {
        self.grades.push(GradeRecord {
            subject: subject.into(),
            score,
            credits,
            study_hours: study_hours.into(),
        });
    }

    /// Grades in the order they were recorded.
    pub fn grades(&self) -> &[GradeRecord] {
        &self.grades
    }

    pub fn total_credits(&self) -> f64 {
        self.grades.iter().map(|g| g.credits).sum()
    }

    /// Credit-weighted mean of grade points across all recorded grades.
    ///
    /// Returns 0.0 when there are no grades or the credits sum to zero.
    pub fn calculate_gpa(&self) -> f64 {
        let (weighted_points, total_credits) =
            self.grades.iter().fold((0.0, 0.0), |(points, credits), g| {
                (points + grade_points(g.score) * g.credits, credits + g.credits)
            });

        if total_credits == 0.0 {
            0.0
        } else {
            weighted_points / total_credits
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Student ID: {}\nStudent name: {}", self.id, self.name)
    }
}
