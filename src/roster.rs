//! In-memory collection of students keyed by id.

use std::collections::HashMap;

use crate::error::{RecordError, Result};
use crate::student::{Student, StudentId};

/// All known students. Iteration follows insertion (or load) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    students: HashMap<StudentId, Student>,
    order: Vec<StudentId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a student with no grades.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::DuplicateStudent`] if `id` is already taken; the
    /// roster is left untouched.
    pub fn add_student(&mut self, id: StudentId, name: impl Into<String>) -> Result<()> {
        if self.students.contains_key(&id) {
            return Err(RecordError::DuplicateStudent(id));
        }

        self.students.insert(id, Student::new(id, name));
        self.order.push(id);
        Ok(())
    }

    /// Appends a grade to an existing student.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnknownStudent`] if no student has `id`.
    pub fn add_grade(
        &mut self,
        id: StudentId,
        subject: impl Into<String>,
        score: f64,
        credits: f64,
        study_hours: impl Into<Option<f64>>,
    ) -> Result<()> {
        let student = self
            .students
            .get_mut(&id)
            .ok_or(RecordError::UnknownStudent(id))?;
        student.add_grade(subject, score, credits, study_hours);
        Ok(())
    }

    /// Returns the student with `id`, registering one named `name` first if
    /// the id is new. An existing student keeps its name.
    pub fn entry_or_register(&mut self, id: StudentId, name: impl Into<String>) -> &mut Student {
        let order = &mut self.order;
        self.students.entry(id).or_insert_with(|| {
            order.push(id);
            Student::new(id, name)
        })
    }

    pub fn find_by_id(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    pub fn student_name(&self, id: StudentId) -> Option<&str> {
        self.find_by_id(id).map(|s| s.name.as_str())
    }

    pub fn all_ids(&self) -> Vec<StudentId> {
        self.order.clone()
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.order.iter().filter_map(|id| self.students.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every `(study_hours, score)` pair on record, in roster order. Grades
    /// without recorded hours are left out.
    pub fn training_samples(&self) -> Vec<(f64, f64)> {
        self.students()
            .flat_map(|s| s.grades().iter())
            .filter_map(|g| g.study_hours.map(|hours| (hours, g.score)))
            .collect()
    }
}
