use crate::handlers::{parse_depth, parse_header_arg};
use clap::{arg, ArgAction};
use jsrecon_core::report::DEFAULT_OUTPUT_FILE;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("jsrecon")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("jsrecon")
        .styles(CLAP_STYLING)
        .about(
            "Discover endpoints referenced by a page's JavaScript, following script-to-script \
            references recursively.",
        )
        .arg(
            arg!(<URL>)
                .help("The page to scan, e.g. https://target.com")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!([DEPTH])
                .help("How many levels of script references to follow (default: unlimited)")
                .value_parser(parse_depth),
        )
        .arg(arg!(-q --"quiet" "Suppress banner, spinner and progress output").required(false))
        .arg(
            arg!(-A --"user-agent" <USER_AGENT>)
                .required(false)
                .help("Replace the default browser User-Agent"),
        )
        .arg(
            arg!(-H --"header" <HEADER>)
                .required(false)
                .help("Extra 'Name: value' header sent with every request (repeatable)")
                .value_parser(parse_header_arg)
                .action(ArgAction::Append),
        )
        .arg(
            arg!(--"headers-file" <PATH>)
                .required(false)
                .help("JSON object of header names to values, applied before --header")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Where to save the discovered endpoints")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .default_value(DEFAULT_OUTPUT_FILE),
        )
}
