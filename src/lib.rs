pub mod batch;
pub mod cli;
pub mod config;
pub mod container;
pub mod mkvmerge;
pub mod planner;
pub mod remux;
pub mod report;
pub mod tracks;
pub mod utils;

pub use batch::{BatchWalker, FileOutcome, RunStatistics, SkipReason};
pub use config::{Config, UndefinedLanguage};
pub use container::{ContainerTool, RemuxRequest};
pub use mkvmerge::MkvMergeTool;
pub use planner::{plan, MutationPlan, PlanDecision};
pub use remux::{RemuxExecutor, RemuxOutcome};
pub use report::{ProcessingEvent, Reporter, TracingReporter};
pub use tracks::{classify, ClassificationResult, LanguagePolicy, TrackMetadata};
pub use utils::{Error, Result};
