//! `utilkit clone` - shallow clone into `<owner>-<repo>`

use std::path::Path;

use anyhow::Result;

use crate::repo::{clone_args, clone_repo, resolve_target};
use crate::utils::print_success;

pub fn run_clone(url: &str, target: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        let resolved = resolve_target(url, target)?;
        println!("{}", resolved.path.display());
        println!("git {}", clone_args(&resolved).join(" "));
        return Ok(());
    }

    let cloned = clone_repo(url, target)?;
    print_success(&format!(
        "Cloned {} repository into {}",
        cloned.platform,
        cloned.path.display()
    ));
    Ok(())
}
