//! Error types for registrar-config

use std::path::PathBuf;

/// Result type for registrar-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while merging and writing package configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Ordering or serializing extensions failed.
    #[error(transparent)]
    Extensions(#[from] registrar_extensions::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse registrar config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to parse package descriptor: {message}")]
    DescriptorParse { message: String },

    /// Section data does not match its `rewrite` flag, or a section is a
    /// tree in one package and text in another.
    #[error("Section '{section}' of package '{package}' is invalid: {reason}")]
    SectionShape {
        package: String,
        section: String,
        reason: String,
    },

    #[error("Section 'extensions' of package '{package}' must map keys to definitions")]
    ExtensionsSection { package: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn section_shape(
        package: &str,
        section: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::SectionShape {
            package: package.to_string(),
            section: section.to_string(),
            reason: reason.into(),
        }
    }
}
