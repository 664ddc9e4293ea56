pub mod classifier;
pub mod metadata;

pub use classifier::{classify, ClassificationResult, LanguagePolicy};
pub use metadata::{TrackKind, TrackMetadata};
