//! Scrape a page into a fixed-shape JSON document

use std::fs;
use std::path::Path;

use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{fetch_text, FetchError};

/// Structured view of a page. Field order is the JSON key order.
#[derive(Debug, Clone, Serialize)]
pub struct PageDocument {
    pub url: String,
    pub title: Option<String>,
    pub meta: Map<String, Value>,
    pub headings: Headings,
    pub paragraphs: Vec<String>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Image {
    pub alt: Option<String>,
    pub src: Option<String>,
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Selector(format!("'{}': {:?}", css, e)))
}

/// Text of every descendant fragment, each trimmed, empties dropped, no separator.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn texts_of(document: &Html, css: &str) -> Result<Vec<String>, FetchError> {
    let sel = selector(css)?;
    Ok(document.select(&sel).map(stripped_text).collect())
}

/// Extract a [`PageDocument`] from already-fetched HTML.
pub fn parse_page(url: &str, html: &str) -> Result<PageDocument, FetchError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("title")?)
        .next()
        .map(|t| t.text().collect::<String>())
        .filter(|t| !t.is_empty());

    let mut meta = Map::new();
    for element in document.select(&selector("meta")?) {
        let attrs = element.value();
        let key = attrs
            .attr("name")
            .filter(|k| !k.is_empty())
            .or_else(|| attrs.attr("property").filter(|k| !k.is_empty()));
        if let Some(key) = key {
            let content = attrs
                .attr("content")
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null);
            meta.insert(key.to_string(), content);
        }
    }

    let headings = Headings {
        h1: texts_of(&document, "h1")?,
        h2: texts_of(&document, "h2")?,
        h3: texts_of(&document, "h3")?,
        h4: texts_of(&document, "h4")?,
        h5: texts_of(&document, "h5")?,
        h6: texts_of(&document, "h6")?,
    };

    let links = document
        .select(&selector("a[href]")?)
        .map(|a| Link {
            text: stripped_text(a),
            href: a.value().attr("href").unwrap_or_default().to_string(),
        })
        .collect();

    let images = document
        .select(&selector("img")?)
        .map(|img| Image {
            alt: img.value().attr("alt").map(str::to_string),
            src: img.value().attr("src").map(str::to_string),
        })
        .collect();

    Ok(PageDocument {
        url: url.to_string(),
        title,
        meta,
        headings,
        paragraphs: texts_of(&document, "p")?,
        links,
        images,
    })
}

/// Fetch `url` and extract its document.
pub fn scrape_to_json(client: &Client, url: &str) -> Result<PageDocument, FetchError> {
    let html = fetch_text(client, url)?;
    parse_page(url, &html)
}

/// Pretty JSON, two-space indent, non-ASCII kept as-is.
pub fn to_json_string(document: &PageDocument) -> Result<String, FetchError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write the document to `path`, creating parent directories.
pub fn write_json(document: &PageDocument, path: &Path) -> Result<(), FetchError> {
    let io_err = |source: std::io::Error| FetchError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = to_json_string(document)?;
    fs::write(path, json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head>
  <title>Example Domain</title>
  <meta charset="utf-8">
  <meta name="description" content="An example">
  <meta property="og:title" content="OG Example">
  <meta name="robots">
</head><body>
  <h1>  Main <em>title</em> </h1>
  <h2>Sub</h2><h2>Other</h2>
  <p>First
     paragraph.</p>
  <p>Café ☕</p>
  <a href="/about"> About us </a>
  <a name="anchor">no href</a>
  <img src="logo.png" alt="Logo">
  <img src="bare.png">
</body></html>"#;

    #[test]
    fn test_parse_fields() {
        let doc = parse_page("https://example.com/", PAGE).unwrap();
        assert_eq!(doc.url, "https://example.com/");
        assert_eq!(doc.title.as_deref(), Some("Example Domain"));
        assert_eq!(doc.headings.h1, vec!["Maintitle"]);
        assert_eq!(doc.headings.h2, vec!["Sub", "Other"]);
        assert!(doc.headings.h3.is_empty());
        assert_eq!(doc.paragraphs[0], "First\n     paragraph.");
        assert_eq!(doc.paragraphs[1], "Café ☕");
        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.links[0].text, "About us");
        assert_eq!(doc.links[0].href, "/about");
        assert_eq!(doc.images.len(), 2);
        assert_eq!(doc.images[1].alt, None);
    }

    #[test]
    fn test_meta_keys() {
        let doc = parse_page("u", PAGE).unwrap();
        assert_eq!(doc.meta.len(), 3);
        assert_eq!(doc.meta["description"], Value::String("An example".into()));
        assert_eq!(doc.meta["og:title"], Value::String("OG Example".into()));
        assert_eq!(doc.meta["robots"], Value::Null);
    }

    #[test]
    fn test_missing_title_is_null() {
        let doc = parse_page("u", "<html><body><p>x</p></body></html>").unwrap();
        assert!(doc.title.is_none());
        let json: Value = serde_json::from_str(&to_json_string(&doc).unwrap()).unwrap();
        assert_eq!(json["title"], Value::Null);
    }

    #[test]
    fn test_json_key_order() {
        let doc = parse_page("u", PAGE).unwrap();
        let json = to_json_string(&doc).unwrap();
        let positions: Vec<usize> = [
            "\"url\"", "\"title\"", "\"meta\"", "\"headings\"", "\"paragraphs\"", "\"links\"",
            "\"images\"",
        ]
        .iter()
        .map(|k| json.find(k).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("Café ☕"));
    }
}
