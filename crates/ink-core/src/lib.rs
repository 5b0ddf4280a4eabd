//! Shared primitives used across Inkling crates.

use core::fmt;

/// Result alias used across the workspace.
pub type InkResult<T> = Result<T, InkError>;

/// Error raised at the edges of the engine (fetching, host I/O).
///
/// Parsing and layout never produce one: they are total over their inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkError {
    pub code: &'static str,
    pub message: String,
}

impl InkError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::new("fetch.failed", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("fetch.not_found", message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new("io", message)
    }
}

impl fmt::Display for InkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for InkError {}

impl From<std::io::Error> for InkError {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            return Self::not_found(error.to_string());
        }
        Self::io(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::InkError;

    #[test]
    fn display_includes_code_and_message() {
        let error = InkError::fetch_failed("connection refused");
        assert_eq!(error.to_string(), "fetch.failed: connection refused");
    }

    #[test]
    fn missing_files_map_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = InkError::from(io);
        assert_eq!(error.code, "fetch.not_found");

        let other = InkError::from(std::io::Error::other("disk on fire"));
        assert_eq!(other.code, "io");
    }
}
