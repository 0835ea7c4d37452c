use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification callers use to pick an exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InputUnavailable,
    UnsupportedOption,
    Io,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("cannot read keywords from '{}': {source}", path.display())]
    Keywords { path: PathBuf, source: std::io::Error },

    #[error("cannot read input list '{}': {source}", path.display())]
    InputList { path: PathBuf, source: std::io::Error },

    #[error("cannot open input '{name}': {source}")]
    InputUnavailable { name: String, source: std::io::Error },

    #[error("option --{0} is not yet supported")]
    UnsupportedOption(&'static str),

    #[error("line {line} of '{source_name}' arrived after line {previous}")]
    LineOrder { source_name: String, previous: usize, line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) | Error::Keywords { .. } | Error::InputList { .. } => ErrorKind::Configuration,
            Error::InputUnavailable { .. } => ErrorKind::InputUnavailable,
            Error::UnsupportedOption(_) => ErrorKind::UnsupportedOption,
            Error::LineOrder { .. } | Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedOption("ignorecase");
        assert_eq!(err.to_string(), "option --ignorecase is not yet supported");
    }

    #[test]
    fn test_error_kinds() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::Keywords { path: "stop.txt".into(), source: missing };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().starts_with("cannot read keywords from 'stop.txt'"));

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::InputUnavailable { name: "a.txt".into(), source: missing };
        assert_eq!(err.kind(), ErrorKind::InputUnavailable);
        assert_eq!(Error::Configuration("x".into()).kind(), ErrorKind::Configuration);
    }
}
