//! utilkit: small everyday utilities
//!
//! Each module is independent: a bash-to-PowerShell profile converter, a
//! Python dependency scanner, a page scraper and downloader, a repository
//! cloner, and the terminal menu in [`cli::menu`].

pub mod cli;
pub mod deps;
#[cfg(feature = "gui")]
pub mod gui;
pub mod profile;
pub mod report;
pub mod repo;
pub mod utils;
pub mod web;
