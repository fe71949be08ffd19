use std::collections::HashSet;

use anyhow::{Result, bail};
use reqwest::Url;

pub fn generic_token(token: &str) -> Result<()> {
    const CHARS: &[u8; 65] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.";
    validate_charset("Token", token, CHARS)
}

/// Only plain HTTP(S) endpoints without a fragment make sense as a webhook destination.
pub fn webhook_url(url: &Url) -> Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        bail!("URL Scheme is {:?} instead of \"https\"", url.scheme());
    }
    if url.host_str().is_none_or(str::is_empty) {
        bail!("URL has no host");
    }
    if let Some(frag) = url.fragment() {
        bail!("Expected no fragment, got {frag}");
    }
    Ok(())
}

fn validate_charset(description: &'static str, string: &str, charset: &'static [u8]) -> Result<()> {
    if string.is_empty() {
        bail!("{description} is empty");
    }
    if string.bytes().all(|b| charset.contains(&b)) {
        return Ok(());
    }

    let set = string
        .bytes()
        .filter(|b| !charset.contains(b))
        .map(char::from)
        .collect::<HashSet<char>>();
    bail!("{description} contains invalid characters: {set:?}");
}
