//! The host side of a query editor session

use super::document::QueryDocument;

/// Receives the finished document after every committed change
pub trait QueryHost {
    fn on_change(&mut self, document: &QueryDocument);

    /// Called after `on_change`; hosts that re-run queries on edit do it here
    fn run_query(&mut self) {}
}

/// Host that ignores changes
#[derive(Debug, Default)]
pub struct NoopQueryHost;

impl QueryHost for NoopQueryHost {
    fn on_change(&mut self, _document: &QueryDocument) {}
}
