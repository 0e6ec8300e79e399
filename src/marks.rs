//! Staff marks entry
//!
//! Exam-type driven marks submission with per-type default maximums and a
//! submission history, newest first.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Exam types a staff member can enter marks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    ClassTest,
    #[serde(rename = "internal_1")]
    Internal1,
    #[serde(rename = "internal_2")]
    Internal2,
    Semester,
}

impl ExamType {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ExamType::ClassTest => "Class Test",
            ExamType::Internal1 => "1st Internal Exam",
            ExamType::Internal2 => "2nd Internal Exam",
            ExamType::Semester => "Semester Exam",
        }
    }

    /// Default maximum marks for this exam type
    pub fn default_max_marks(&self) -> u32 {
        match self {
            ExamType::ClassTest | ExamType::Internal1 => 40,
            ExamType::Internal2 => 80,
            ExamType::Semester => 100,
        }
    }
}

/// A new submission as posted by a staff member
#[derive(Debug, Deserialize)]
pub struct NewMarksSubmission {
    pub exam_type: ExamType,
    pub subject: String,
    pub semester: u8,
    /// Defaults by exam type when omitted
    #[serde(default)]
    pub max_marks: Option<u32>,
    /// Roll number to score
    pub marks: HashMap<String, u32>,
}

/// A validated, recorded submission
#[derive(Debug, Clone, Serialize)]
pub struct MarksSubmission {
    pub id: Uuid,
    pub exam_type: ExamType,
    pub exam_label: &'static str,
    pub subject: String,
    pub semester: u8,
    pub max_marks: u32,
    pub marks: HashMap<String, u32>,
    pub student_count: usize,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
}

impl NewMarksSubmission {
    /// Validate and stamp the submission
    pub fn into_submission(self, submitted_by: &str) -> Result<MarksSubmission> {
        if self.subject.trim().is_empty() {
            return Err(Error::InvalidMarks("subject is required".to_string()));
        }
        if !(1..=8).contains(&self.semester) {
            return Err(Error::InvalidMarks(format!(
                "semester {} is out of range",
                self.semester
            )));
        }
        if self.marks.is_empty() {
            return Err(Error::InvalidMarks("no marks entered".to_string()));
        }

        let max_marks = self
            .max_marks
            .unwrap_or_else(|| self.exam_type.default_max_marks());
        if max_marks == 0 {
            return Err(Error::InvalidMarks("max marks must be positive".to_string()));
        }
        if let Some((roll, score)) = self.marks.iter().find(|(_, s)| **s > max_marks) {
            return Err(Error::InvalidMarks(format!(
                "score {} for '{}' exceeds maximum of {}",
                score, roll, max_marks
            )));
        }

        let student_count = self.marks.len();
        Ok(MarksSubmission {
            id: Uuid::new_v4(),
            exam_type: self.exam_type,
            exam_label: self.exam_type.label(),
            subject: self.subject,
            semester: self.semester,
            max_marks,
            marks: self.marks,
            student_count,
            submitted_by: submitted_by.to_string(),
            submitted_at: Utc::now(),
        })
    }
}

/// Submission history, newest first
#[derive(Debug, Default)]
pub struct MarksStore {
    submissions: Vec<MarksSubmission>,
}

impl MarksStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, submission: MarksSubmission) {
        self.submissions.insert(0, submission);
    }

    pub fn history(&self) -> &[MarksSubmission] {
        &self.submissions
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(exam_type: ExamType, max_marks: Option<u32>, score: u32) -> NewMarksSubmission {
        NewMarksSubmission {
            exam_type,
            subject: "BCA501".to_string(),
            semester: 5,
            max_marks,
            marks: HashMap::from([("2024001".to_string(), score)]),
        }
    }

    #[test]
    fn test_default_max_marks_by_exam_type() {
        assert_eq!(ExamType::ClassTest.default_max_marks(), 40);
        assert_eq!(ExamType::Internal1.default_max_marks(), 40);
        assert_eq!(ExamType::Internal2.default_max_marks(), 80);
        assert_eq!(ExamType::Semester.default_max_marks(), 100);
    }

    #[test]
    fn test_exam_type_wire_names() {
        assert_eq!(
            serde_json::to_value(ExamType::ClassTest).unwrap(),
            "class_test"
        );
        assert_eq!(
            serde_json::to_value(ExamType::Internal1).unwrap(),
            "internal_1"
        );
        assert_eq!(
            serde_json::to_value(ExamType::Internal2).unwrap(),
            "internal_2"
        );
        assert_eq!(serde_json::to_value(ExamType::Semester).unwrap(), "semester");
    }

    #[test]
    fn test_submission_applies_default_max() {
        let recorded = submission(ExamType::Internal2, None, 75)
            .into_submission("Teacher User")
            .unwrap();
        assert_eq!(recorded.max_marks, 80);
        assert_eq!(recorded.student_count, 1);
        assert_eq!(recorded.exam_label, "2nd Internal Exam");
        assert_eq!(recorded.submitted_by, "Teacher User");
    }

    #[test]
    fn test_score_over_max_rejected() {
        let result = submission(ExamType::ClassTest, None, 41).into_submission("Teacher User");
        assert!(matches!(result, Err(Error::InvalidMarks(_))));
    }

    #[test]
    fn test_explicit_max_overrides_default() {
        let recorded = submission(ExamType::ClassTest, Some(50), 41)
            .into_submission("Teacher User")
            .unwrap();
        assert_eq!(recorded.max_marks, 50);
    }

    #[test]
    fn test_empty_marks_rejected() {
        let new = NewMarksSubmission {
            exam_type: ExamType::Semester,
            subject: "BCA501".to_string(),
            semester: 5,
            max_marks: None,
            marks: HashMap::new(),
        };
        assert!(matches!(
            new.into_submission("Teacher User"),
            Err(Error::InvalidMarks(_))
        ));
    }

    #[test]
    fn test_store_is_newest_first() {
        let mut store = MarksStore::new();
        let first = submission(ExamType::ClassTest, None, 10)
            .into_submission("Teacher User")
            .unwrap();
        let second = submission(ExamType::Internal1, None, 20)
            .into_submission("Teacher User")
            .unwrap();
        let second_id = second.id;
        store.record(first);
        store.record(second);
        assert_eq!(store.len(), 2);
        assert_eq!(store.history()[0].id, second_id);
    }
}
