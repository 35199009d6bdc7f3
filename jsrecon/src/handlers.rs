use clap::ArgMatches;
use clap::error::ErrorKind;
use colored::Colorize;
use jsrecon_core::headers::{RequestHeaders, load_headers_file, parse_header_line};
use jsrecon_core::recon::{ReconOptions, execute_recon};
use jsrecon_core::report::{generate_endpoint_report, generate_summary, save_endpoints};
use jsrecon_scanner::{ProgressCallback, RecursionBudget, ScanError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;

/// clap value parser for the optional depth argument
pub fn parse_depth(value: &str) -> Result<RecursionBudget, String> {
    value.parse::<RecursionBudget>().map_err(|e| {
        format!(
            "Recursion depth must be a number or leave blank for unlimited ({})",
            e
        )
    })
}

/// clap value parser for `-H 'Name: value'`
pub fn parse_header_arg(value: &str) -> Result<(String, String), String> {
    parse_header_line(value).map_err(|e| e.to_string())
}

/// Exit code for a clap parse failure. Help and version output are not errors.
pub fn usage_exit_code(error: &clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
        _ => EXIT_USAGE,
    }
}

/// Default headers, then the headers file, then `-H` values; later wins.
pub fn build_request_headers(
    user_agent: Option<&String>,
    headers_file: Option<&PathBuf>,
    header_args: Vec<(String, String)>,
) -> Result<RequestHeaders, String> {
    let mut headers = RequestHeaders::new();

    if let Some(user_agent) = user_agent {
        headers = headers.with_user_agent(user_agent);
    }

    if let Some(path) = headers_file {
        let from_file = load_headers_file(path).map_err(|e| format!("{:#}", e))?;
        headers = headers.with_headers(from_file);
    }

    headers = headers.with_headers(header_args);

    // Reject names or values reqwest would refuse before anything is sent
    headers.to_header_map().map_err(|e| e.to_string())?;

    Ok(headers)
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Operator message for a run that ended before any script was parsed.
pub fn describe_recon_error(url: &Url, error: &ScanError) -> String {
    match error {
        ScanError::HttpError(_) => format!("Error fetching {} - {}", url, error),
        _ => error.to_string(),
    }
}

fn print_progress(msg: String) {
    let trimmed = msg.trim_start();
    if trimmed.starts_with("[!]") {
        println!("{}", msg.yellow());
    } else if trimmed.starts_with("[~]") {
        println!("{}", msg.dimmed());
    } else if trimmed.starts_with("[*]") {
        println!("{}", msg.cyan());
    } else {
        println!("{}", msg);
    }
}

/// Run one target and report. Returns the process exit code.
pub async fn handle_recon(matches: &ArgMatches) -> i32 {
    init_tracing();

    let url = match matches.get_one::<Url>("URL") {
        Some(url) => url,
        None => {
            eprintln!("{} A target URL is required", "[!]".red().bold());
            return EXIT_USAGE;
        }
    };
    let budget = matches
        .get_one::<RecursionBudget>("DEPTH")
        .copied()
        .unwrap_or_default();
    let quiet = matches.get_flag("quiet");
    let timeout_secs = *matches.get_one::<u64>("timeout").unwrap_or(&10);
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(jsrecon_core::report::DEFAULT_OUTPUT_FILE));
    let header_args: Vec<(String, String)> = matches
        .get_many::<(String, String)>("header")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let headers = match build_request_headers(
        matches.get_one::<String>("user-agent"),
        matches.get_one::<PathBuf>("headers-file"),
        header_args,
    ) {
        Ok(headers) => headers,
        Err(e) => {
            eprintln!("{} {}", "[!]".red().bold(), e);
            return EXIT_USAGE;
        }
    };

    if !quiet {
        println!("{} Target: {}", "→".blue(), url.as_str().bright_white());
        println!("{} Max depth: {}", "→".blue(), budget);
        println!();
    }

    let options = ReconOptions {
        target: url.as_str().to_string(),
        budget,
        headers,
        timeout_secs,
        show_progress_bars: !quiet,
    };

    let progress_callback: Option<ProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(print_progress))
    };

    let result = match execute_recon(options, progress_callback).await {
        Ok(result) => result,
        Err(e) => {
            // The run ends here but this is not a usage error
            eprintln!("{} {}", "[!]".red().bold(), describe_recon_error(url, &e));
            return EXIT_OK;
        }
    };

    print!("{}", generate_endpoint_report(&result));
    if !quiet {
        println!("\n{}", generate_summary(&result));
    }

    match save_endpoints(&result, &output) {
        Ok(()) => println!(
            "{} Saved to {}",
            "[+]".green().bold(),
            output.display().to_string().bright_white()
        ),
        Err(e) => eprintln!(
            "{} Failed to write to {}: {}",
            "[!]".red().bold(),
            output.display(),
            e
        ),
    }

    EXIT_OK
}
