//! `utilkit profile` - append a translated bash profile to the PowerShell profile

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use crate::cli::prompts::confirm_append;
use crate::profile::{
    convert_profile, find_source_profile, render_profile, resolve_destination, translate_file,
};
use crate::utils::{
    print_card, print_completion, print_info, print_success, print_warning, FOLDER, SAVE,
};

pub fn run_profile(
    source: Option<&Path>,
    dest: Option<&Path>,
    dry_run: bool,
    assume_yes: bool,
) -> Result<()> {
    let source = match source {
        Some(path) => path.to_path_buf(),
        None => {
            let home = dirs::home_dir().context("Could not determine the home directory")?;
            match find_source_profile(&home) {
                Some(path) => path,
                None => {
                    print_info("No ~/.bashrc or ~/.bash_profile found; nothing to convert");
                    return Ok(());
                }
            }
        }
    };

    let translation = translate_file(&source)?;
    for name in &translation.unterminated {
        print_warning(&format!(
            "Function '{}' has no closing '}}' and was not translated",
            name
        ));
    }

    if dry_run {
        print!("{}", render_profile(&translation));
        return Ok(());
    }

    let dest: PathBuf = dest.map(Path::to_path_buf).unwrap_or_else(resolve_destination);

    println!(
        "\n {} Converting bash profile to PowerShell",
        style("◆").cyan().bold()
    );
    print_card(
        "Profile conversion",
        &[
            (&FOLDER, "Source", source.display().to_string()),
            (&SAVE, "Target", dest.display().to_string()),
        ],
    );

    if !assume_yes && !confirm_append(translation.lines.len(), &dest.display().to_string())? {
        println!("Cancelled by user.");
        return Ok(());
    }

    let outcome = convert_profile(&source, &dest)?;
    if let Some(backup) = &outcome.backup {
        print_success(&format!("Backed up existing profile to {}", backup.display()));
    }
    print_success(&format!(
        "Appended {} translated line(s)",
        outcome.translation.lines.len()
    ));

    print_completion(&format!("Update complete: {}", outcome.destination.display()));
    Ok(())
}
