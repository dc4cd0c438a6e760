//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Input};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm appending to a profile
pub fn confirm_append(line_count: usize, destination: &str) -> Result<bool> {
    let message = format!("Append {} translated line(s) to {}?", line_count, destination);
    confirm_step(&message)
}

/// Block until the user presses ENTER
pub fn pause_for_enter(message: &str) -> Result<()> {
    Input::<String>::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}
