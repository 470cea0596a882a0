//! The snapshotting capability injected into assertions.

use anyhow::Result;

/// How to turn a value into its snapshot string, and how to compare an
/// expected snapshot against an actual one. The engine consumes nothing else
/// of a snapshot strategy.
pub trait Strategy<Value> {
    /// Produces the snapshot string for `value`.
    fn snapshot(&self, value: Value) -> Result<String>;

    /// Returns a rendered difference, or `None` if the two match.
    fn diff(&self, expected: &str, actual: &str) -> Option<String>;
}

/// A strategy assembled from two functions.
pub struct FnStrategy<S, D> {
    pub snapshot: S,
    pub diff: D,
}

impl<Value, S, D> Strategy<Value> for FnStrategy<S, D>
where
    S: Fn(Value) -> Result<String>,
    D: Fn(&str, &str) -> Option<String>,
{
    fn snapshot(&self, value: Value) -> Result<String> {
        (self.snapshot)(value)
    }

    fn diff(&self, expected: &str, actual: &str) -> Option<String> {
        (self.diff)(expected, actual)
    }
}
