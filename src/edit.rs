/// Which snapshot slot of an assertion call holds the inline snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntaxDescriptor {
    /// The label used when a new labeled closure must be appended.
    pub trailing_closure_label: String,
    /// The slot offset, relative to the first trailing-closure position.
    pub trailing_closure_offset: usize,
}

impl Default for SyntaxDescriptor {
    fn default() -> Self {
        Self {
            trailing_closure_label: String::from("matches"),
            trailing_closure_offset: 0,
        }
    }
}

/// One recorded intent to update a file at a specific call site.
#[derive(Clone, Debug)]
pub struct PendingEdit {
    /// The snapshot already embedded in the source, normalized, if any.
    pub expected: Option<String>,
    /// The freshly produced snapshot.
    pub actual: String,
    /// Whether the assertion ran in record mode.
    pub was_recording: bool,
    pub descriptor: SyntaxDescriptor,
    /// The called expression's base name, for failure messages.
    pub function_name: String,
    /// The call key: the start of the called expression (1-based line,
    /// 0-based column).
    pub line: usize,
    pub column: usize,
}
