pub mod budget;
pub mod client;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod locate;
pub mod result;

pub use budget::RecursionBudget;
pub use client::{FetchedPage, HttpFetcher};
pub use error::ScanError;
pub use extract::{Endpoint, EndpointSet, extract};
pub use fetcher::{ProgressCallback, ScriptFetcher};
pub use locate::{PageScripts, locate};
pub use result::{FetchSession, FetchStats, ReconResult};
