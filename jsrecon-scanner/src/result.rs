use crate::budget::RecursionBudget;
use crate::extract::EndpointSet;
use std::collections::HashSet;
use std::time::Duration;

/// Counters kept while a target is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub scripts_fetched: usize,
    pub fetch_failures: usize,
    pub inline_scripts: usize,
    pub bytes_fetched: usize,
}

/// State threaded through every recursive fetch of one target run.
///
/// The recursion budget is passed per call since it shrinks with depth; the
/// origin and visited set are shared by the whole call tree.
#[derive(Debug, Clone)]
pub struct FetchSession {
    base_origin: String,
    pub visited: HashSet<String>,
    pub stats: FetchStats,
}

impl FetchSession {
    pub fn new(base_origin: impl Into<String>) -> Self {
        Self {
            base_origin: base_origin.into(),
            visited: HashSet::new(),
            stats: FetchStats::default(),
        }
    }

    pub fn base_origin(&self) -> &str {
        &self.base_origin
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }
}

/// Everything one target run produced.
#[derive(Debug, Clone)]
pub struct ReconResult {
    pub target: String,
    pub base_origin: String,
    pub budget: RecursionBudget,
    pub endpoints: EndpointSet,
    pub stats: FetchStats,
    pub elapsed: Duration,
}

impl ReconResult {
    /// Endpoints in lexicographic order.
    pub fn sorted_endpoints(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.endpoints.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}
