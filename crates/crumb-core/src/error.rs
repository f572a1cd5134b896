use std::sync::Arc;

/// An error that can occur in Crumb.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    /// A required field was missing or empty when persisting an entity.
    Validation(String),

    /// The targeted record does not exist.
    NotFound(String),

    /// The storage engine rejected the operation due to a foreign-key or
    /// uniqueness constraint.
    Constraint(String),

    /// The storage engine could not be reached or opened.
    Connectivity(String),

    /// The registered schema failed verification.
    InvalidSchema(String),

    /// A statement referenced tables or columns that do not exist in the
    /// schema, or was otherwise malformed.
    InvalidStatement(String),

    /// A value could not be converted to the requested type.
    TypeConversion { value: String, target: &'static str },

    /// Any other storage engine failure.
    Driver(anyhow::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        ErrorKind::Validation(message.into()).into()
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ErrorKind::NotFound(message.into()).into()
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        ErrorKind::Constraint(message.into()).into()
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        ErrorKind::Connectivity(message.into()).into()
    }

    pub fn invalid_schema(message: impl Into<String>) -> Self {
        ErrorKind::InvalidSchema(message.into()).into()
    }

    pub fn invalid_statement(message: impl Into<String>) -> Self {
        ErrorKind::InvalidStatement(message.into()).into()
    }

    pub fn type_conversion(value: impl std::fmt::Debug, target: &'static str) -> Self {
        ErrorKind::TypeConversion {
            value: format!("{value:?}"),
            target,
        }
        .into()
    }

    pub fn driver(err: impl Into<anyhow::Error>) -> Self {
        ErrorKind::Driver(err.into()).into()
    }

    pub fn is_validation(&self) -> bool {
        matches!(*self.inner, ErrorKind::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(*self.inner, ErrorKind::NotFound(_))
    }

    pub fn is_constraint(&self) -> bool {
        matches!(*self.inner, ErrorKind::Constraint(_))
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(*self.inner, ErrorKind::Connectivity(_))
    }

    pub fn is_invalid_schema(&self) -> bool {
        matches!(*self.inner, ErrorKind::InvalidSchema(_))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.inner {
            ErrorKind::Driver(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match &*self.inner {
            Validation(msg) => write!(f, "validation error: {msg}"),
            NotFound(msg) => write!(f, "record not found: {msg}"),
            Constraint(msg) => write!(f, "constraint violation: {msg}"),
            Connectivity(msg) => write!(f, "storage unreachable: {msg}"),
            InvalidSchema(msg) => write!(f, "invalid schema: {msg}"),
            InvalidStatement(msg) => write!(f, "invalid statement: {msg}"),
            TypeConversion { value, target } => {
                write!(f, "cannot convert {value} to {target}")
            }
            Driver(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            f.debug_struct("Error").field("kind", &self.inner).finish()
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            inner: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::driver(err)
    }
}
