//! Addresses of node slots inside a builder document
//!
//! A path is a sequence of field names and collection indices starting at
//! the query root, written `filter.fields[1].extractionFn`. The empty path
//! is the root.

use crate::errors::{BuilderError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend with a field name
    pub fn field(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Field(name.to_string()));
        next
    }

    /// Extend with a collection index
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Index(index));
        next
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Path of the first `len` segments
    pub fn truncated(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// Re-address this path after element `removed` of `collection` is gone.
    ///
    /// Returns `None` when the path lives under the removed element. Paths
    /// under later elements move down by one index.
    pub fn after_removal(&self, collection: &NodePath, removed: usize) -> Option<Self> {
        if !self.starts_with(collection) {
            return Some(self.clone());
        }
        let at = collection.segments.len();
        match self.segments.get(at) {
            Some(PathSegment::Index(i)) if *i == removed => None,
            Some(PathSegment::Index(i)) if *i > removed => {
                let mut next = self.clone();
                next.segments[at] = PathSegment::Index(i - 1);
                Some(next)
            }
            _ => Some(self.clone()),
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = BuilderError;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = |reason: &str| BuilderError::InvalidPath {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let mut path = NodePath::root();
        if input.is_empty() {
            return Ok(path);
        }

        for part in input.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(at) => (&part[..at], &part[at..]),
                None => (part, ""),
            };
            if name.is_empty() {
                return Err(invalid("empty field name"));
            }
            path.segments.push(PathSegment::Field(name.to_string()));

            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                if !rest.starts_with('[') {
                    return Err(invalid("unexpected text after index"));
                }
                let index = rest[1..close]
                    .parse::<usize>()
                    .map_err(|_| invalid("index is not a non-negative integer"))?;
                path.segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
            }
        }
        Ok(path)
    }
}
