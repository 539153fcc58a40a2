use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LetterGrade {
    F,
    D,
    C,
    B,
    A,
}

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

/// Letter grade for a 0-1 comparison score.
pub fn letter_grade(score: f64) -> LetterGrade {
    if score >= 0.9 {
        LetterGrade::A
    } else if score >= 0.8 {
        LetterGrade::B
    } else if score >= 0.7 {
        LetterGrade::C
    } else if score >= 0.6 {
        LetterGrade::D
    } else {
        LetterGrade::F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_steps() {
        assert_eq!(letter_grade(1.0), LetterGrade::A);
        assert_eq!(letter_grade(0.9), LetterGrade::A);
        assert_eq!(letter_grade(0.85), LetterGrade::B);
        assert_eq!(letter_grade(0.7), LetterGrade::C);
        assert_eq!(letter_grade(0.65), LetterGrade::D);
        assert_eq!(letter_grade(0.2), LetterGrade::F);
        assert_eq!(letter_grade(0.0), LetterGrade::F);
    }

    #[test]
    fn test_grade_is_monotonic() {
        let mut previous = letter_grade(0.0);
        for step in 0..=100 {
            let grade = letter_grade(step as f64 / 100.0);
            assert!(grade >= previous, "grade dropped at {}", step);
            previous = grade;
        }
    }

    #[test]
    fn test_nan_is_failing() {
        assert_eq!(letter_grade(f64::NAN), LetterGrade::F);
    }
}
