//! CLI module - argument parsing, interactive pieces and subcommand runners

mod args;
pub mod clone;
pub mod deps;
pub mod download;
pub mod menu;
pub mod profile;
pub mod prompts;
pub mod scrape;

pub use args::{Cli, Commands};
pub use clone::run_clone;
pub use deps::run_deps;
pub use download::run_download;
pub use menu::{default_entries, run_menu};
pub use profile::run_profile;
pub use prompts::*;
pub use scrape::run_scrape;
