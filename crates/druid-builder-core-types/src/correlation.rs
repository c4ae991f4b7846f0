//! Correlation identifiers attached to editor operations
//!
//! Every editing session gets a `SessionId`; every command applied through a
//! session gets a fresh `RequestId`. Both show up in log events so a single
//! edit can be followed from the host callback down to the document change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a single applied command
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new time-ordered RequestId (UUIDv7)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an identifier received from elsewhere
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one editor session (one mounted query or config editor)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation carried into a single operation
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub session_id: SessionId,
    pub request_id: RequestId,
}

impl RequestContext {
    /// Fresh request within the given session
    pub fn for_session(session_id: &SessionId) -> Self {
        Self {
            session_id: session_id.clone(),
            request_id: RequestId::new(),
        }
    }
}
