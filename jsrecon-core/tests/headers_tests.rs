// Tests for request header configuration

use jsrecon_core::headers::{
    DEFAULT_USER_AGENT, RequestHeaders, load_headers_file, parse_header_line,
};
use std::io::Write;
use tempfile::NamedTempFile;

// ============================================================================
// Header Line Parsing Tests
// ============================================================================

#[test]
fn test_parse_header_line_simple() {
    let (name, value) = parse_header_line("Authorization: Bearer abc123").unwrap();
    assert_eq!(name, "Authorization");
    assert_eq!(value, "Bearer abc123");
}

#[test]
fn test_parse_header_line_trims_whitespace() {
    let (name, value) = parse_header_line("  X-API-Key :   secret  ").unwrap();
    assert_eq!(name, "X-API-Key");
    assert_eq!(value, "secret");
}

#[test]
fn test_parse_header_line_value_with_colon() {
    let (name, value) = parse_header_line("Referer: https://site.com/").unwrap();
    assert_eq!(name, "Referer");
    assert_eq!(value, "https://site.com/");
}

#[test]
fn test_parse_header_line_empty_value() {
    let (name, value) = parse_header_line("X-Empty:").unwrap();
    assert_eq!(name, "X-Empty");
    assert_eq!(value, "");
}

#[test]
fn test_parse_header_line_rejects_missing_colon() {
    assert!(parse_header_line("Authorization Bearer").is_err());
}

#[test]
fn test_parse_header_line_rejects_missing_name() {
    assert!(parse_header_line(": value").is_err());
}

// ============================================================================
// Header Set Tests
// ============================================================================

#[test]
fn test_headers_extend_and_override() {
    let headers = RequestHeaders::new()
        .with_headers(vec![("X-API-Key", "abc"), ("Cookie", "a=b")])
        .with_user_agent("jsrecon-test");

    assert_eq!(headers.len(), 3);
    assert_eq!(headers.get("x-api-key"), Some("abc"));
    assert_eq!(headers.get("USER-AGENT"), Some("jsrecon-test"));
    assert_ne!(headers.get("User-Agent"), Some(DEFAULT_USER_AGENT));
}

// ============================================================================
// Headers File Tests
// ============================================================================

#[test]
fn test_load_headers_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(
        temp_file,
        r#"{{"Authorization": "Bearer YOUR_TOKEN", "X-API-Key": "abc123"}}"#
    )?;

    let headers = load_headers_file(temp_file.path())?;
    assert_eq!(headers.len(), 2);
    assert_eq!(headers["Authorization"], "Bearer YOUR_TOKEN");
    assert_eq!(headers["X-API-Key"], "abc123");

    Ok(())
}

#[test]
fn test_load_headers_file_rejects_non_object() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, r#"["Authorization", "Bearer"]"#).unwrap();

    assert!(load_headers_file(temp_file.path()).is_err());
}

#[test]
fn test_load_headers_file_missing() {
    let result = load_headers_file(std::path::Path::new("/nonexistent/headers.json"));
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to read headers file"));
}
