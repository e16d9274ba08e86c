//! Error types.

/// An error while serializing a document.
#[derive(Debug)]
pub enum SerializeError {
    /// An error while writing to the sink.
    IO(std::io::Error),
    /// An error after writing to string.
    UTF8(std::string::FromUtf8Error),
}

impl std::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IO(err) => err.fmt(f),
            Self::UTF8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IO(err) => Some(err),
            Self::UTF8(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SerializeError {
    fn from(value: std::io::Error) -> Self {
        Self::IO(value)
    }
}
