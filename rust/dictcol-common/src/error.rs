use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_config(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidConfig {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_query(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidQuery {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn worker_failed(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::WorkerFailed {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    /// Returns `true` for the configuration errors raised before a build starts.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidConfig { .. })
    }

    /// Returns `true` for rejected query arguments.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidQuery { .. })
    }

    /// Returns `true` for payload failures: either the underlying reader/writer
    /// failed, or the serialized text is malformed or truncated.
    pub fn is_io(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Io { .. } | ErrorKind::InvalidFormat { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid configuration {name}: {message}")]
    InvalidConfig { name: String, message: String },

    #[error("invalid query: {message}")]
    InvalidQuery { message: String },

    #[error("invalid serialized format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("column build failed: {message}")]
    WorkerFailed { message: String },

    #[error("IO error for '{context}': {source}'")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_predicates() {
        let e = Error::invalid_config("worker_count", "worker_count >= 1");
        assert!(e.is_invalid_config());
        assert!(!e.is_io());
        assert_eq!(
            e.to_string(),
            "invalid configuration worker_count: worker_count >= 1"
        );

        let e = Error::invalid_query("prefix must not be empty");
        assert!(e.is_invalid_query());

        let e = Error::invalid_format("dictionary", "missing header");
        assert!(e.is_io());

        let e: Error = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(e.is_io());
        assert!(matches!(e.into_kind(), ErrorKind::Io { .. }));
    }
}
