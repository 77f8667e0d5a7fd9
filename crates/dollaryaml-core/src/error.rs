//! Error types for dollaryaml
//!
//! Errors are structured: a kind that callers can match on, plus optional
//! path, cause and help text for humans.

use std::fmt;

/// Result type alias for dollaryaml operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dollaryaml operations
#[derive(Debug, Clone)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Path expression (or file path for I/O errors) the error refers to
    pub path: Option<String>,
    /// Actionable help message
    pub help: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A path segment is missing, or the path ends on a mapping or sequence
    #[error("Value not found: '{segment}'")]
    NotFound { segment: String },
    /// The path continues past a scalar or sequence
    #[error("Level does not match")]
    LevelMismatch,
    /// The backing file could not be read
    #[error("I/O error")]
    Io,
    /// serde_yaml rejected the input or the projection
    #[error("Format error while {stage}")]
    Format { stage: FormatStage },
}

/// The stage of loading or projection a format error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStage {
    /// Parsing the source document
    Parse,
    /// Serializing the resolved tree
    Marshal,
    /// Binding the serialized tree to the target type
    Unmarshal,
}

impl fmt::Display for FormatStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatStage::Parse => write!(f, "parsing document"),
            FormatStage::Marshal => write!(f, "marshaling"),
            FormatStage::Unmarshal => write!(f, "unmarshaling to target"),
        }
    }
}

impl Error {
    fn from_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: None,
            help: None,
            cause: None,
        }
    }

    /// Create a not found error for the missing segment of `path`
    pub fn not_found(segment: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            help: Some(format!(
                "Check that '{}' exists in the profile and ends on a scalar",
                path
            )),
            path: Some(path),
            ..Self::from_kind(ErrorKind::NotFound {
                segment: segment.into(),
            })
        }
    }

    /// Create a level mismatch error
    pub fn level_mismatch(path: impl Into<String>, at_segment: &str) -> Self {
        Self {
            path: Some(path.into()),
            cause: Some(format!("'{}' is not a mapping", at_segment)),
            help: Some("The path is deeper than the profile at this point".into()),
            ..Self::from_kind(ErrorKind::LevelMismatch)
        }
    }

    /// Create an I/O error for a file that could not be read
    pub fn io(file: impl Into<String>, err: &std::io::Error) -> Self {
        Self {
            path: Some(file.into()),
            cause: Some(err.to_string()),
            help: Some("Check that the file exists and is readable".into()),
            ..Self::from_kind(ErrorKind::Io)
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::format(FormatStage::Parse, message)
    }

    /// Create an error for a resolved tree that could not be serialized
    pub fn marshal(message: impl Into<String>) -> Self {
        Self::format(FormatStage::Marshal, message)
    }

    /// Create an error for a serialized tree that did not fit the target type
    pub fn unmarshal(message: impl Into<String>) -> Self {
        Self {
            help: Some("Check that the target fields match the profile's keys and types".into()),
            ..Self::format(FormatStage::Unmarshal, message)
        }
    }

    fn format(stage: FormatStage, message: impl Into<String>) -> Self {
        Self {
            cause: Some(message.into()),
            ..Self::from_kind(ErrorKind::Format { stage })
        }
    }

    /// Add path context to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// True for [`ErrorKind::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// True for [`ErrorKind::LevelMismatch`]
    pub fn is_level_mismatch(&self) -> bool {
        self.kind == ErrorKind::LevelMismatch
    }

    /// The format stage, if this is a format error
    pub fn format_stage(&self) -> Option<FormatStage> {
        match self.kind {
            ErrorKind::Format { stage } => Some(stage),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(path) = &self.path {
            write!(f, "\n  Path: {}", path)?;
        }

        if let Some(cause) = &self.cause {
            write!(f, "\n  {}", cause)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}
