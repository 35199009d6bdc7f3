// Console and file reporting of discovered endpoints

use colored::Colorize;
use jsrecon_scanner::{ReconResult, ScanError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_OUTPUT_FILE: &str = "discovered_endpoints.txt";

/// Count and sorted list of endpoints, as printed at the end of a run.
pub fn generate_endpoint_report(result: &ReconResult) -> String {
    let endpoints = result.sorted_endpoints();

    let mut report = String::new();
    report.push_str(&format!(
        "\n{} Discovered {} endpoints:\n",
        "[+]".green().bold(),
        endpoints.len()
    ));
    for endpoint in &endpoints {
        report.push_str(endpoint);
        report.push('\n');
    }
    report
}

/// One-line statistics for the run.
pub fn generate_summary(result: &ReconResult) -> String {
    format!(
        "{} {} scripts fetched ({} bytes), {} failed, {} inline scripts, depth {}, {:.2}s",
        "[i]".blue().bold(),
        result.stats.scripts_fetched,
        result.stats.bytes_fetched,
        result.stats.fetch_failures,
        result.stats.inline_scripts,
        result.budget,
        result.elapsed.as_secs_f64()
    )
}

/// Endpoints one per line, newline-terminated.
pub fn render_endpoint_lines(endpoints: &[&str]) -> String {
    let mut content = String::with_capacity(endpoints.iter().map(|e| e.len() + 1).sum());
    for endpoint in endpoints {
        content.push_str(endpoint);
        content.push('\n');
    }
    content
}

/// Write the sorted endpoints to `path`, replacing any existing file.
pub fn save_endpoints(result: &ReconResult, path: &Path) -> Result<(), ScanError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_endpoint_lines(&result.sorted_endpoints()).as_bytes())?;
    writer.flush()?;
    Ok(())
}
