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

    pub fn disposed(operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::Disposed {
                operation: operation.into(),
            }
            .into(),
        )
    }

    pub fn out_of_range(index: usize, size: usize) -> Error {
        Error(ErrorKind::OutOfRange { index, size }.into())
    }

    pub fn short_read(context: impl Into<String>) -> Error {
        Error(
            ErrorKind::ShortRead {
                context: context.into(),
            }
            .into(),
        )
    }

    pub fn malformed_varint(max_bytes: usize) -> Error {
        Error(ErrorKind::MalformedVarint { max_bytes }.into())
    }

    pub fn unsupported(operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::Unsupported {
                operation: operation.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
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
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("operation '{operation}' on a disposed owner")]
    Disposed { operation: String },

    #[error("index {index} out of range (size {size})")]
    OutOfRange { index: usize, size: usize },

    #[error("short read: {context}")]
    ShortRead { context: String },

    #[error("varint exceeds the {max_bytes}-byte bound without terminating")]
    MalformedVarint { max_bytes: usize },

    #[error("unsupported: {operation}")]
    Unsupported { operation: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("IO error for '{context}': {source}")]
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
