//! Node identifiers and the node struct.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, totally ordered node identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Create an ID from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A graph vertex: an immutable identity plus a caller-defined payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node<T = ()> {
    id: Id,
    data: T,
}

impl Node<()> {
    /// A node with no payload.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            data: (),
        }
    }
}

impl<T> Node<T> {
    /// A node carrying `data`.
    pub fn with_data(id: impl Into<Id>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Split into ID and payload.
    pub fn into_parts(self) -> (Id, T) {
        (self.id, self.data)
    }
}

impl<T> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
