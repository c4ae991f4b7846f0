//! Shared types for the Druid query builder facilities
//!
//! Small building blocks used by error reporting and logging:
//!
//! - **Correlation types**: RequestId, SessionId, RequestContext
//! - **Sensitive data**: Sensitive<T> for secrets that must never be logged
//! - **Schema constants**: canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, SessionId};
pub use sensitive::Sensitive;
