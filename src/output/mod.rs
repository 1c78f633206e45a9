//! Report assembly and output formatting

pub mod formatter;
pub mod presentation;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use presentation::{explanation_for, feedback_for, format_percentage, MatchFeedback};
pub use report::{MatchReport, ReportMetadata};
