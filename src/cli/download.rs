//! `utilkit download` - page and assets into a folder

use std::path::Path;

use anyhow::{Context, Result};

use crate::report::display_download_summary;
use crate::utils::{print_card, print_completion, AssetProgress, FOLDER, LINK};
use crate::web::{build_client, download_page, AssetOutcome, FetchOptions};

pub fn run_download(url: &str, out: &Path, options: &FetchOptions) -> Result<()> {
    let client = build_client(options)?;

    print_card(
        "Page download",
        &[
            (&LINK, "Page", url.to_string()),
            (&FOLDER, "Folder", out.display().to_string()),
        ],
    );

    // Length is unknown until the page has been parsed.
    let mut progress: Option<AssetProgress> = None;
    let report = download_page(&client, url, out, |total, outcome| {
        let progress = progress.get_or_insert_with(|| AssetProgress::new(total));
        match outcome {
            AssetOutcome::Saved(saved) => progress.saved(&saved.file_name, saved.bytes),
            AssetOutcome::Failed(failed) => progress.failed(failed.url.as_str(), &failed.reason),
        }
    })
    .with_context(|| format!("Failed to download {}", url))?;

    if let Some(progress) = &progress {
        progress.finish();
    }

    display_download_summary(&report);
    print_completion(&format!("Page and assets saved in folder: {}", out.display()));
    Ok(())
}
