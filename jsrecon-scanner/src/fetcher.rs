use crate::budget::RecursionBudget;
use crate::client::HttpFetcher;
use crate::error::ScanError;
use crate::extract::{EndpointSet, extract};
use crate::result::FetchSession;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, warn};

pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Fetches scripts and follows the `.js` references found inside them.
pub struct ScriptFetcher {
    http: HttpFetcher,
    progress_callback: Option<ProgressCallback>,
}

impl ScriptFetcher {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn report(&self, message: String) {
        if let Some(ref callback) = self.progress_callback {
            callback(message);
        }
    }

    /// Fetch `url`, extract its endpoints and recurse into referenced scripts.
    ///
    /// Returns nothing without touching the network when `url` was already
    /// visited in this session or `budget` is exhausted. The URL is marked
    /// visited before the request goes out. Fetch failures are logged and
    /// contribute an empty set.
    pub fn fetch_and_extract<'a>(
        &'a self,
        url: &'a str,
        budget: RecursionBudget,
        session: &'a mut FetchSession,
    ) -> BoxFuture<'a, EndpointSet> {
        async move {
            if session.is_visited(url) || budget.is_exhausted() {
                debug!("Skipping {} (visited or depth exhausted)", url);
                return EndpointSet::new();
            }
            session.visited.insert(url.to_string());

            let page = match self.http.get_ok(url).await {
                Ok(page) => page,
                Err(ScanError::Status(status_code)) => {
                    session.stats.fetch_failures += 1;
                    warn!("{} returned HTTP {}", url, status_code);
                    self.report(format!("    [!] {} returned HTTP {}", url, status_code));
                    return EndpointSet::new();
                }
                Err(e) => {
                    session.stats.fetch_failures += 1;
                    warn!("Error fetching {}: {}", url, e);
                    self.report(format!("    [!] Error fetching {} - {}", url, e));
                    return EndpointSet::new();
                }
            };

            session.stats.scripts_fetched += 1;
            session.stats.bytes_fetched += page.body.len();
            self.report(format!("    [~] {} - {} bytes", url, page.body.len()));

            let discovered = extract(&page.body, session.base_origin());
            debug!("{} references {} endpoint(s)", url, discovered.len());

            // Sorted so the depth at which a shared script is reached does not
            // depend on hash order.
            let mut scripts: Vec<&String> = discovered
                .iter()
                .filter(|link| link.ends_with(".js"))
                .collect();
            scripts.sort_unstable();

            let mut found = EndpointSet::new();
            for script in scripts {
                if !session.is_visited(script) {
                    let nested = self
                        .fetch_and_extract(script, budget.descend(), session)
                        .await;
                    found.extend(nested);
                }
            }

            found.extend(discovered);
            found
        }
        .boxed()
    }
}
