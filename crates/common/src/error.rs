use std::fmt;
use std::path::PathBuf;

/// PaperBrief error types
#[derive(Debug, thiserror::Error)]
pub enum PaperBriefError {
    /// Referenced PDF does not exist
    #[error("PDF not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// PDF could not be read or parsed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Network/HTTP error (connection failure or non-2xx status)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with an unexpected body
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error category, used in log lines and batch outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingFile,
    Extraction,
    Transport,
    MalformedResponse,
    Config,
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingFile => "missing_file",
            Self::Extraction => "extraction",
            Self::Transport => "transport",
            Self::MalformedResponse => "malformed_response",
            Self::Config => "config",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PaperBriefError {
    /// Create missing file error
    pub fn missing_file<P: Into<PathBuf>>(path: P) -> Self {
        Self::MissingFile(path.into())
    }

    /// Create extraction error
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create malformed response error
    pub fn malformed_response<S: Into<String>>(msg: S) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile(_) => ErrorKind::MissingFile,
            Self::Extraction(_) => ErrorKind::Extraction,
            Self::Network(_) => ErrorKind::Transport,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Config(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Unexpected,
        }
    }
}
