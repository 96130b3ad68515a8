use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;
use serde_json::Value;

use crate::config::SourceSettings;
use crate::playlist::{Locator, Track};

/// Fetch and parse the remote manifest under `base`, bypassing caches.
///
/// The manifest is JSON: either a bare array of path strings or an object
/// with a `tracks` array. Failures propagate; the caller surfaces them as a
/// placeholder with an empty playlist.
pub fn fetch_manifest(
    client: &Client,
    base: &str,
    settings: &SourceSettings,
) -> Result<Vec<Track>, Box<dyn Error>> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let url = format!(
        "{}/{}?t={stamp}",
        base.trim_end_matches('/'),
        settings.manifest_file
    );

    log::info!("fetching manifest from {url}");
    let body = client
        .get(&url)
        .header(CACHE_CONTROL, "no-store")
        .send()?
        .error_for_status()?
        .text()?;

    parse_manifest(&body, base, &settings.extensions)
}

/// Parse a manifest body against `base`, keeping only entries with a
/// recognized audio extension (case-insensitive) in manifest order.
pub fn parse_manifest(
    body: &str,
    base: &str,
    extensions: &[String],
) -> Result<Vec<Track>, Box<dyn Error>> {
    let json: Value = serde_json::from_str(body)?;
    let list = match &json {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("tracks") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Err("manifest object has no `tracks` array".into()),
        },
        _ => return Err("manifest is neither an array nor an object".into()),
    };

    let base = base.trim_end_matches('/');
    let tracks = list
        .iter()
        .filter_map(Value::as_str)
        .filter(|entry| has_audio_ext(entry, extensions))
        .map(|entry| Track {
            name: base_name(entry, extensions),
            locator: Locator::Remote(root_under(entry, base)),
        })
        .collect();
    Ok(tracks)
}

/// True when `name` ends with one of the configured extensions, ignoring case.
pub fn has_audio_ext(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .any(|e| lower.ends_with(&format!(".{e}")))
}

/// Root a manifest entry under the base location unless it already is an
/// absolute URL or already lives under the base path.
fn root_under(entry: &str, base: &str) -> String {
    if entry.starts_with("http://") || entry.starts_with("https://") {
        return entry.to_string();
    }
    let entry = entry.trim_start_matches('/');
    if let Some(dir) = base.rsplit('/').next() {
        if !dir.is_empty() && entry.starts_with(&format!("{dir}/")) {
            // Entry is already prefixed with the base directory name.
            let parent = &base[..base.len() - dir.len()];
            return format!("{}{entry}", parent);
        }
    }
    format!("{base}/{entry}")
}

/// Display name for a manifest entry: base filename, percent-decoded, with
/// the audio extension stripped.
fn base_name(entry: &str, extensions: &[String]) -> String {
    let file = entry.rsplit('/').next().unwrap_or(entry);
    let decoded = percent_decode(file);
    strip_audio_ext(&decoded, extensions)
}

fn strip_audio_ext(name: &str, extensions: &[String]) -> String {
    let lower = name.to_lowercase();
    for ext in extensions {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && lower.ends_with(&format!(".{ext}")) {
            return name[..name.len() - ext.len() - 1].to_string();
        }
    }
    name.to_string()
}

/// Minimal percent-decoding; malformed escapes are kept verbatim.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            // Hex digits are read off the raw bytes; slicing the str here
            // would panic when a multibyte character follows the escape.
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_string())
}
