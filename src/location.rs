use std::path::PathBuf;

/// The position of an assertion call: the start of the called expression,
/// which is what [`std::panic::Location::caller`] reports for the call.
/// Lines are 1-based; columns are 0-based, matching
/// [`proc_macro2::LineColumn`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl From<&std::panic::Location<'_>> for Location {
    fn from(caller: &std::panic::Location<'_>) -> Self {
        // `panic::Location` columns are 1-based.
        Self {
            file: PathBuf::from(caller.file()),
            line: caller.line() as usize,
            column: caller.column().saturating_sub(1) as usize,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file.display(),
            self.line,
            self.column + 1
        )
    }
}
