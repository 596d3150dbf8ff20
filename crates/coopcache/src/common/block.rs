//! Data units stored in caches and on disk.

use std::fmt;
use std::sync::Arc;

use super::ids::ContentId;

/// Immutable named payload.
///
/// The content identity is computed once at construction. Cloning is cheap:
/// the payload is shared, never copied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    id: ContentId,
    data: Arc<str>,
}

impl Block {
    /// Creates a block from its payload.
    pub fn new(data: impl Into<Arc<str>>) -> Self {
        let data = data.into();
        Self {
            id: ContentId::of(&data),
            data,
        }
    }

    /// Returns the content identity of the payload.
    #[inline]
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Returns the payload.
    #[inline]
    pub fn data(&self) -> &str {
        &self.data
    }
}

impl From<&str> for Block {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}

impl From<String> for Block {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
