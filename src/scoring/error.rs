use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("{field} has {actual} entries but its melody has {expected} notes")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Timing data must include all four arrays; missing: {missing}")]
    IncompleteTiming { missing: String },
}

pub type Result<T> = std::result::Result<T, MatchError>;
