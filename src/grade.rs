//! Percentage score to grade point / letter conversion.

use std::fmt;

/// A letter grade on the 4.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    F,
}

/// Inclusive lower bounds, highest first. Anything below the last bound is an F.
static THRESHOLDS: &[(f64, Grade)] = &[
    (93.0, Grade::A),
    (90.0, Grade::AMinus),
    (87.0, Grade::BPlus),
    (83.0, Grade::B),
    (80.0, Grade::BMinus),
    (77.0, Grade::CPlus),
    (73.0, Grade::C),
    (70.0, Grade::CMinus),
    (67.0, Grade::DPlus),
    (60.0, Grade::D),
];

impl Grade {
    /// Buckets a score using the fixed threshold table.
    ///
    /// | Score   | Grade | Points |
    /// |---------|-------|--------|
    /// | >= 93   | A     | 4.0    |
    /// | >= 90   | A-    | 3.7    |
    /// | >= 87   | B+    | 3.3    |
    /// | >= 83   | B     | 3.0    |
    /// | >= 80   | B-    | 2.7    |
    /// | >= 77   | C+    | 2.3    |
    /// | >= 73   | C     | 2.0    |
    /// | >= 70   | C-    | 1.7    |
    /// | >= 67   | D+    | 1.3    |
    /// | >= 60   | D     | 1.0    |
    /// | < 60    | F     | 0.0    |
    ///
    /// Scores outside 0..=100 are not rejected; they fall into whichever
    /// bucket the table gives them.
    pub fn from_score(score: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(bound, _)| score >= *bound)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn points(self) -> f64 {
        match self {
            Grade::A => 4.0,
            Grade::AMinus => 3.7,
            Grade::BPlus => 3.3,
            Grade::B => 3.0,
            Grade::BMinus => 2.7,
            Grade::CPlus => 2.3,
            Grade::C => 2.0,
            Grade::CMinus => 1.7,
            Grade::DPlus => 1.3,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Grade points (0.0 to 4.0) earned by `score`.
pub fn grade_points(score: f64) -> f64 {
    Grade::from_score(score).points()
}

/// Letter grade earned by `score`.
pub fn letter_grade(score: f64) -> &'static str {
    Grade::from_score(score).letter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(letter_grade(100.0), "A");
        assert_eq!(letter_grade(93.0), "A");
        assert_eq!(letter_grade(92.9), "A-");
        assert_eq!(letter_grade(90.0), "A-");
        assert_eq!(letter_grade(89.9), "B+");
        assert_eq!(letter_grade(87.0), "B+");
        assert_eq!(letter_grade(83.0), "B");
        assert_eq!(letter_grade(80.0), "B-");
        assert_eq!(letter_grade(77.0), "C+");
        assert_eq!(letter_grade(73.0), "C");
        assert_eq!(letter_grade(70.0), "C-");
        assert_eq!(letter_grade(67.0), "D+");
        assert_eq!(letter_grade(60.0), "D");
        assert_eq!(letter_grade(59.9), "F");
        assert_eq!(letter_grade(0.0), "F");
    }

    #[test]
    fn test_points_and_letter_share_bucket() {
        let cases = [
            (93.0, 4.0, "A"),
            (92.9, 3.7, "A-"),
            (88.0, 3.3, "B+"),
            (85.0, 3.0, "B"),
            (81.5, 2.7, "B-"),
            (78.0, 2.3, "C+"),
            (74.0, 2.0, "C"),
            (71.0, 1.7, "C-"),
            (68.0, 1.3, "D+"),
            (65.0, 1.0, "D"),
            (59.9, 0.0, "F"),
        ];

        for (score, points, letter) in cases {
            assert_eq!(grade_points(score), points, "points for {score}");
            assert_eq!(letter_grade(score), letter, "letter for {score}");
        }
    }

    #[test]
    fn test_out_of_range_scores_still_map() {
        assert_eq!(Grade::from_score(150.0), Grade::A);
        assert_eq!(Grade::from_score(-20.0), Grade::F);
        assert_eq!(grade_points(f64::NAN), 0.0);
    }

    #[test]
    fn test_display_uses_letter() {
        assert_eq!(Grade::BPlus.to_string(), "B+");
        assert_eq!(format!("{}", Grade::CMinus), "C-");
    }
}
