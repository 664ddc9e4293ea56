pub mod executor;

pub use executor::{RemuxExecutor, RemuxOutcome};
