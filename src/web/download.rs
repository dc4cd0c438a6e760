//! Download a page and its images, scripts and stylesheets into one folder
//!
//! Assets are fetched one at a time. A failed asset is recorded in the report
//! and passed to the callback, then skipped; only the page itself is fatal.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use lol_html::{element, rewrite_str, RewriteStrSettings};
use regex::{Captures, Regex};
use reqwest::blocking::Client;
use reqwest::Url;
use tracing::debug;

use super::{fetch_bytes, fetch_text, FetchError};

pub const INDEX_FILE: &str = "index.html";

/// Tags carrying asset references and the attribute holding the URL.
pub const ASSET_ATTRIBUTES: [(&str, &str); 3] =
    [("img", "src"), ("script", "src"), ("link", "href")];

/// One reference found in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub tag: String,
    pub attr: &'static str,
    /// Attribute value as written in the page
    pub raw: String,
    /// Resolved against the page URL
    pub url: Url,
}

#[derive(Debug, Clone)]
pub struct SavedAsset {
    pub url: Url,
    pub file_name: String,
    pub bytes: usize,
}

#[derive(Debug, Clone)]
pub struct FailedAsset {
    pub url: Url,
    pub reason: String,
}

/// Progress callback payload, one per distinct asset URL
#[derive(Debug, Clone)]
pub enum AssetOutcome<'a> {
    Saved(&'a SavedAsset),
    Failed(&'a FailedAsset),
}

#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub html_path: PathBuf,
    pub saved: Vec<SavedAsset>,
    pub failed: Vec<FailedAsset>,
}

fn html_error(err: impl std::fmt::Display) -> FetchError {
    FetchError::Html(err.to_string())
}

// Numeric references plus the named entities that show up in URLs.
static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|(amp|quot|apos|lt|gt));").unwrap()
});

/// Decode character references in a raw attribute value (lol_html does not).
/// Unknown or out-of-range references are left as written.
pub fn decode_attribute(raw: &str) -> String {
    ENTITY_PATTERN
        .replace_all(raw, |caps: &Captures<'_>| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
            } else {
                match caps.get(3).map(|m| m.as_str()) {
                    Some("amp") => Some('&'),
                    Some("quot") => Some('"'),
                    Some("apos") => Some('\''),
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn resolve(base: &Url, raw: &str) -> Option<Url> {
    let url = base.join(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Every fetchable `img[src]`, `script[src]` and `link[href]` in document order.
pub fn discover_assets(html: &str, base: &Url) -> Result<Vec<AssetRef>, FetchError> {
    let found = RefCell::new(Vec::new());

    let collect = |tag: &'static str, attr: &'static str, value: String| {
        let decoded = decode_attribute(&value);
        match resolve(base, &decoded) {
            Some(url) => found.borrow_mut().push(AssetRef {
                tag: tag.to_string(),
                attr,
                raw: value,
                url,
            }),
            None => debug!(tag, value = %decoded, "skipping non-http asset reference"),
        }
    };

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("img[src]", |el| {
                    if let Some(value) = el.get_attribute("src") {
                        collect("img", "src", value);
                    }
                    Ok(())
                }),
                element!("script[src]", |el| {
                    if let Some(value) = el.get_attribute("src") {
                        collect("script", "src", value);
                    }
                    Ok(())
                }),
                element!("link[href]", |el| {
                    if let Some(value) = el.get_attribute("href") {
                        collect("link", "href", value);
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(html_error)?;

    Ok(found.into_inner())
}

/// Last path segment of the URL, `asset` when there is none.
pub fn local_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or("asset")
        .to_string()
}

/// `name`, or `stem-N.ext` for the first N that is not yet taken.
pub fn unique_file_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    };
    (1..)
        .map(|n| format!("{}-{}{}", stem, n, ext))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

/// Point every reference whose resolved URL is in `local_names` at the local file.
pub fn rewrite_references(
    html: &str,
    base: &Url,
    local_names: &HashMap<Url, String>,
) -> Result<String, FetchError> {
    let local_for = |value: &str| {
        resolve(base, &decode_attribute(value)).and_then(|url| local_names.get(&url).cloned())
    };

    let handlers = ASSET_ATTRIBUTES
        .iter()
        .map(|&(tag, attr)| {
            let selector = format!("{}[{}]", tag, attr);
            (selector, attr)
        })
        .collect::<Vec<_>>();

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers
                .iter()
                .map(|(selector, attr)| {
                    let attr = *attr;
                    element!(selector, move |el| {
                        if let Some(name) = el.get_attribute(attr).and_then(|v| local_for(&v)) {
                            el.set_attribute(attr, &name)?;
                        }
                        Ok(())
                    })
                })
                .collect(),
            ..RewriteStrSettings::default()
        },
    )
    .map_err(html_error)
}

/// Fetch `page_url`, download its assets into `out_dir`, rewrite references and
/// save the page as `index.html`. `on_asset` is called once per distinct asset.
pub fn download_page<F>(
    client: &Client,
    page_url: &str,
    out_dir: &Path,
    mut on_asset: F,
) -> Result<DownloadReport, FetchError>
where
    F: FnMut(usize, AssetOutcome<'_>),
{
    let base = Url::parse(page_url).map_err(|e| FetchError::InvalidUrl {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;

    fs::create_dir_all(out_dir).map_err(|source| FetchError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let html = fetch_text(client, page_url)?;
    let assets = discover_assets(&html, &base)?;

    let mut distinct: Vec<Url> = Vec::new();
    for asset in assets {
        if !distinct.contains(&asset.url) {
            distinct.push(asset.url);
        }
    }

    let mut report = DownloadReport::default();
    let mut taken: HashSet<String> = HashSet::from([INDEX_FILE.to_string()]);
    let mut local_names: HashMap<Url, String> = HashMap::new();
    let total = distinct.len();

    for url in distinct {
        match save_asset(client, &url, out_dir, &taken) {
            Ok(saved) => {
                debug!(url = %url, file = %saved.file_name, "saved asset");
                taken.insert(saved.file_name.clone());
                local_names.insert(url, saved.file_name.clone());
                report.saved.push(saved);
                if let Some(saved) = report.saved.last() {
                    on_asset(total, AssetOutcome::Saved(saved));
                }
            }
            Err(err) => {
                debug!(url = %url, error = %err, "asset download failed");
                report.failed.push(FailedAsset {
                    url,
                    reason: err.to_string(),
                });
                if let Some(failed) = report.failed.last() {
                    on_asset(total, AssetOutcome::Failed(failed));
                }
            }
        }
    }

    let rewritten = rewrite_references(&html, &base, &local_names)?;
    let html_path = out_dir.join(INDEX_FILE);
    fs::write(&html_path, rewritten).map_err(|source| FetchError::Io {
        path: html_path.clone(),
        source,
    })?;
    report.html_path = html_path;

    Ok(report)
}

fn save_asset(
    client: &Client,
    url: &Url,
    out_dir: &Path,
    taken: &HashSet<String>,
) -> Result<SavedAsset, FetchError> {
    let bytes = fetch_bytes(client, url.as_str())?;
    let file_name = unique_file_name(&local_file_name(url), taken);
    let path = out_dir.join(&file_name);
    fs::write(&path, &bytes).map_err(|source| FetchError::Io { path, source })?;

    Ok(SavedAsset {
        url: url.clone(),
        file_name,
        bytes: bytes.len(),
    })
}
