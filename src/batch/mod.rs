pub mod stats;
pub mod walker;

pub use stats::{FailedFile, RunStatistics};
pub use walker::{BatchWalker, FileOutcome, SkipReason};
