//! `utilkit deps` - third-party imports of a Python file

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::deps::{resolve_dependencies, ModuleLocator, NullLocator, PythonLocator};
use crate::report::display_dependency_table;

pub fn run_deps(file: &Path, use_python: bool, show_table: bool) -> Result<()> {
    let python = if use_python {
        PythonLocator::discover()
    } else {
        None
    };
    let locator: &dyn ModuleLocator = match &python {
        Some(locator) => locator,
        None => {
            info!("no Python interpreter consulted; unknown modules count as third-party");
            &NullLocator
        }
    };

    let report = resolve_dependencies(file, locator)
        .with_context(|| format!("Failed to scan {}", file.display()))?;

    if show_table {
        display_dependency_table(&report);
    }

    let third_party = report.third_party();
    println!("Dependencies found:");
    for dep in &third_party {
        println!("- {}", dep);
    }

    println!();
    println!("Suggested uv command:");
    println!("{}", report.install_command());

    Ok(())
}
