use colored::Colorize;

pub mod headers;
pub mod recon;
pub mod report;

pub use headers::RequestHeaders;
pub use jsrecon_scanner::ProgressCallback;
pub use recon::{ReconOptions, execute_recon};

pub fn print_banner() {
    let banner = r#"
       _
      (_)___ _ __ ___  ___ ___  _ __
      | / __| '__/ _ \/ __/ _ \| '_ \
      | \__ \ | |  __/ (_| (_) | | | |
     _/ |___/_|  \___|\___\___/|_| |_|
    |__/
"#;
    println!("{}", banner.bright_cyan().bold());
    println!(
        "    {} v{}\n",
        "JavaScript endpoint discovery".bright_white(),
        env!("CARGO_PKG_VERSION")
    );
}
