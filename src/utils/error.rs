use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tool error: {message}")]
    Tool { message: String },

    #[error("Metadata error: {message}")]
    Metadata { message: String },

    #[error("Remux error: {message}")]
    Remux { message: String },

    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl Error {
    pub fn tool<T: Into<String>>(message: T) -> Self {
        Self::Tool {
            message: message.into(),
        }
    }

    pub fn metadata<T: Into<String>>(message: T) -> Self {
        Self::Metadata {
            message: message.into(),
        }
    }

    pub fn remux<T: Into<String>>(message: T) -> Self {
        Self::Remux {
            message: message.into(),
        }
    }

    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn not_a_directory<P: AsRef<Path>>(path: P) -> Self {
        Self::NotADirectory {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
