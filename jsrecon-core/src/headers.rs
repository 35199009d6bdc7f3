// Static request headers sent with every GET of a run

use anyhow::Context;
use jsrecon_scanner::ScanError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/114.0.0.0 Safari/537.36";

/// Header name to value. Names compare case-insensitively when overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    headers: BTreeMap<String, String>,
}

impl RequestHeaders {
    /// Default browser-like User-Agent and nothing else.
    pub fn new() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
        Self { headers }
    }

    pub fn with_user_agent(self, user_agent: &str) -> Self {
        self.with_header("User-Agent", user_agent)
    }

    /// Add a header, replacing any existing one with the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        headers.into_iter().fold(self, |acc, (name, value)| {
            acc.with_header(name.as_ref(), value.as_ref())
        })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn to_header_map(&self) -> Result<HeaderMap, ScanError> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ScanError::InvalidHeader(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ScanError::InvalidHeader(format!("{}: {}", name, e)))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

impl Default for RequestHeaders {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `Name: value` header line as given on the command line.
pub fn parse_header_line(line: &str) -> Result<(String, String), ScanError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ScanError::InvalidHeader(format!("expected 'Name: value', got '{}'", line)))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ScanError::InvalidHeader(format!("missing header name in '{}'", line)));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

/// Load a JSON object of header name to value.
pub fn load_headers_file(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read headers file {}", path.display()))?;

    let headers: BTreeMap<String, String> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object of strings", path.display()))?;

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent() {
        let headers = RequestHeaders::new();
        assert_eq!(headers.get("user-agent"), Some(DEFAULT_USER_AGENT));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_override_is_case_insensitive() {
        let headers = RequestHeaders::new().with_header("user-agent", "custom/1.0");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("User-Agent"), Some("custom/1.0"));
    }

    #[test]
    fn test_header_map_conversion() {
        let map = RequestHeaders::new()
            .with_header("Authorization", "Bearer token")
            .to_header_map()
            .unwrap();
        assert_eq!(map.get("authorization").unwrap(), "Bearer token");
        assert!(map.contains_key("user-agent"));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let result = RequestHeaders::new()
            .with_header("Bad Name", "x")
            .to_header_map();
        assert!(matches!(result, Err(ScanError::InvalidHeader(_))));
    }
}
