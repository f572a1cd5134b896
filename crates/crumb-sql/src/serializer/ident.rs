use std::fmt;

/// A quoted SQL identifier.
pub(crate) struct Ident<T>(pub(crate) T);

impl<T: AsRef<str>> fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.as_ref().replace('"', "\"\""))
    }
}
