pub mod alignment;
pub mod compare;
pub mod difficulty;
pub mod error;
pub mod grade;
pub mod metrics;
pub mod types;
