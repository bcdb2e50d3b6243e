use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::fmt;

/// A dot-joined symbolic path that renders as a `{{path}}` template expression.
///
/// Empty segments are dropped at construction, so optional namespace prefixes can be
/// passed straight through without producing `..` or a leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathReference {
    path: String,
}

impl PathReference {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = segments
            .into_iter()
            .filter(|segment| !segment.as_ref().is_empty())
            .map(|segment| segment.as_ref().to_string())
            .join(".");
        Self { path }
    }

    /// The bare path without the surrounding braces.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a reference one level deeper.
    pub fn child(&self, name: &str) -> Self {
        Self::new([self.path.as_str(), name])
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Builds a reference from optional segments, skipping `None` and empty strings.
pub fn make_reference(segments: &[Option<&str>]) -> PathReference {
    PathReference::new(segments.iter().flatten())
}

impl fmt::Display for PathReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}}}}}", self.path)
    }
}

impl Serialize for PathReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<PathReference> for String {
    fn from(reference: PathReference) -> Self {
        reference.to_string()
    }
}
