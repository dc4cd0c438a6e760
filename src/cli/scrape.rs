//! `utilkit scrape` - page to JSON

use std::path::Path;

use anyhow::{Context, Result};

use crate::utils::{fetch_spinner, print_success};
use crate::web::{build_client, scrape_to_json, to_json_string, write_json, FetchOptions};

/// Print the JSON to stdout, or write it to `out`.
pub fn run_scrape(url: &str, out: Option<&Path>, options: &FetchOptions) -> Result<()> {
    let client = build_client(options)?;

    let spinner = fetch_spinner(url);
    let document = match scrape_to_json(&client, url) {
        Ok(document) => document,
        Err(err) => {
            spinner.finish_and_clear();
            return Err(err).with_context(|| format!("Failed to scrape {}", url));
        }
    };
    spinner.finish_and_clear();

    match out {
        Some(path) => {
            write_json(&document, path)?;
            print_success(&format!("JSON saved to {}", path.display()));
        }
        None => println!("{}", to_json_string(&document)?),
    }

    Ok(())
}
