use crate::converter::LocationConverter;
use anyhow::{Context, Result};
use std::{
    cell::RefCell,
    collections::HashMap,
    fs::read_to_string,
    ops::Deref,
    path::{Path, PathBuf},
    rc::Rc,
};

thread_local! {
    static SOURCE_FILES: RefCell<HashMap<PathBuf, SourceFile>> = RefCell::new(HashMap::new());
}

/// A parsed test source file: the original text, its syntax tree, and (on
/// demand) a location converter. Cheap to clone; equality and hashing are
/// over the path. Parses are memoized per thread for the duration of the
/// run, so every component sees the file as it was when first loaded.
#[derive(Clone)]
pub struct SourceFile {
    inner: Rc<Inner>,
}

struct Inner {
    path: PathBuf,
    contents: &'static str,
    syntax: syn::File,
}

impl SourceFile {
    /// Loads and parses `path`, or returns the memoized parse. Unreadable or
    /// unparsable files are errors; the engine cannot reconcile recordings
    /// against a file it cannot see.
    pub fn parse(path: &Path) -> Result<Self> {
        SOURCE_FILES.with(|source_files| {
            let mut source_files = source_files.borrow_mut();

            if let Some(source_file) = source_files.get(path) {
                return Ok(source_file.clone());
            }

            let contents = read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            // Leaking the contents is a hack.
            let leaked: &'static str = Box::leak(contents.into_boxed_str());
            let syntax = syn::parse_file(leaked)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            let source_file = Self {
                inner: Rc::new(Inner {
                    path: path.to_path_buf(),
                    contents: leaked,
                    syntax,
                }),
            };
            source_files.insert(path.to_path_buf(), source_file.clone());
            Ok(source_file)
        })
    }

    #[must_use]
    pub fn contents(&self) -> &'static str {
        self.inner.contents
    }

    #[must_use]
    pub fn syntax(&self) -> &syn::File {
        &self.inner.syntax
    }

    /// A fresh converter over the file's contents. Converters are stateful
    /// (queries must be ordered), so each pass takes its own.
    #[must_use]
    pub fn converter(&self) -> LocationConverter<'static> {
        LocationConverter::new(self.inner.contents)
    }
}

impl Eq for SourceFile {}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.inner.path.eq(&other.inner.path)
    }
}

impl std::hash::Hash for SourceFile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.path.hash(state);
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <_ as std::fmt::Debug>::fmt(&self.inner.path, f)
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.path.display())
    }
}

impl AsRef<Path> for SourceFile {
    fn as_ref(&self) -> &Path {
        &self.inner.path
    }
}

impl Deref for SourceFile {
    type Target = Path;
    fn deref(&self) -> &Self::Target {
        self.inner.path.deref()
    }
}
