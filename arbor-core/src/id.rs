//! Identifier types shared by every stage of the pipeline.

use std::{borrow::Borrow, fmt, sync::Arc};

/// Dense index assigned to a cluster when it is first seen by the graph.
pub type NodeIndex = usize;

/// Opaque identifier of a sequence cluster.
///
/// Cloning is cheap: the identifier text is shared behind an [`Arc`].
///
/// # Examples
/// ```
/// use arbor_core::ClusterId;
///
/// let id = ClusterId::new("KX123");
/// assert_eq!(id.as_str(), "KX123");
/// assert_eq!(id.to_string(), "KX123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(Arc<str>);

impl ClusterId {
    /// Wraps the supplied identifier text.
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ClusterId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClusterId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClusterId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
