pub mod identify;
pub mod tool;

#[cfg(test)]
pub(crate) mod fake;

pub use identify::parse_identify_output;
pub use tool::MkvMergeTool;
