use crate::headers::RequestHeaders;
use indicatif::{ProgressBar, ProgressStyle};
use jsrecon_scanner::client::DEFAULT_TIMEOUT_SECS;
use jsrecon_scanner::extract::join_origin;
use jsrecon_scanner::{
    EndpointSet, FetchSession, HttpFetcher, ProgressCallback, ReconResult, RecursionBudget,
    ScanError, ScriptFetcher, extract, locate,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Options for one target run
pub struct ReconOptions {
    pub target: String,
    pub budget: RecursionBudget,
    pub headers: RequestHeaders,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl ReconOptions {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            budget: RecursionBudget::Unlimited,
            headers: RequestHeaders::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            show_progress_bars: false,
        }
    }
}

/// Scheme, host and non-default port of `target`, without a trailing slash.
pub fn base_origin(target: &Url) -> Result<String, ScanError> {
    match target.scheme() {
        "http" | "https" if target.host_str().is_some() => {
            Ok(target.origin().ascii_serialization())
        }
        _ => Err(ScanError::InvalidUrl(format!(
            "{} is not an http(s) URL with a host",
            target
        ))),
    }
}

/// Resolve a script `src` attribute against the base origin.
///
/// Produces the same strings the extractor does for the same reference, so
/// visited-set keys line up.
pub fn resolve_script_src(base_origin: &str, src: &str) -> String {
    let src = src.trim();
    if has_scheme(src) {
        src.to_string()
    } else if let Some(rest) = src.strip_prefix("//") {
        let scheme = base_origin.split_once("://").map_or("https", |(scheme, _)| scheme);
        format!("{}://{}", scheme, rest)
    } else if src.starts_with('/') {
        join_origin(base_origin, src)
    } else {
        join_origin(base_origin, &format!("/{}", src))
    }
}

fn has_scheme(reference: &str) -> bool {
    match reference.split_once(':') {
        Some((scheme, _)) => {
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Run the whole pipeline for one target.
///
/// Only a failure to fetch the seed page (or an unusable target URL or header
/// set) is returned as an error. Every script and inline block failure is
/// logged and contributes nothing.
pub async fn execute_recon(
    options: ReconOptions,
    progress_callback: Option<ProgressCallback>,
) -> Result<ReconResult, ScanError> {
    let ReconOptions {
        target,
        budget,
        headers,
        timeout_secs,
        show_progress_bars,
    } = options;

    let started = Instant::now();
    let target_url =
        Url::parse(&target).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", target, e)))?;
    let origin = base_origin(&target_url)?;

    let http = HttpFetcher::with_timeout(headers.to_header_map()?, timeout_secs)?;

    // Single spinner for the whole run (only if enabled)
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {}", target));
        Some(Arc::new(pb))
    } else {
        None
    };

    let report: ProgressCallback = {
        let pb = progress_bar.clone();
        let callback = progress_callback.clone();
        Arc::new(move |msg: String| match (&pb, &callback) {
            (Some(pb), Some(callback)) => pb.suspend(|| callback(msg)),
            (None, Some(callback)) => callback(msg),
            (Some(pb), None) => pb.tick(),
            (None, None) => {}
        })
    };

    info!("Starting recon of {} (depth: {})", target, budget);

    let seed = match http.get(&target).await {
        Ok(seed) => seed,
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.finish_and_clear();
            }
            return Err(e);
        }
    };
    if !seed.is_ok() {
        warn!("{} returned HTTP {}, scanning body anyway", target, seed.status_code);
        report(format!(
            "[!] {} returned HTTP {}, scanning body anyway",
            target, seed.status_code
        ));
    }

    let scripts = locate(&seed.body);
    debug!(
        "{}: {} script source(s), {} inline script(s)",
        target,
        scripts.sources.len(),
        scripts.inline.len()
    );

    let fetcher = ScriptFetcher::new(http).with_progress_callback(report.clone());
    let mut session = FetchSession::new(origin.clone());
    let mut endpoints = EndpointSet::new();

    for src in &scripts.sources {
        let full_url = resolve_script_src(&origin, src);
        report(format!("[*] Parsing {}", full_url));
        let found = fetcher
            .fetch_and_extract(&full_url, budget, &mut session)
            .await;
        endpoints.extend(found);

        if let Some(ref pb) = progress_bar {
            pb.set_message(format!(
                "{} scripts fetched, {} endpoints",
                session.stats.scripts_fetched,
                endpoints.len()
            ));
        }
    }

    for inline in &scripts.inline {
        let links = extract(inline, &origin);
        session.stats.inline_scripts += 1;
        report(format!(
            "[*] Inline script - {} bytes: {} links found",
            inline.len(),
            links.len()
        ));
        endpoints.extend(links);
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    info!(
        "Recon of {} complete: {} endpoints from {} scripts",
        target,
        endpoints.len(),
        session.stats.scripts_fetched
    );

    Ok(ReconResult {
        target,
        base_origin: origin,
        budget,
        endpoints,
        stats: session.stats,
        elapsed: started.elapsed(),
    })
}
