//! Command-line argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// utilkit - small everyday utilities behind one binary
#[derive(Parser, Debug)]
#[command(name = "utilkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase diagnostic output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu launching disk usage (df -h) or a process viewer (htop)
    Menu,

    /// Translate ~/.bashrc (or ~/.bash_profile) into the PowerShell profile
    Profile {
        /// Bash profile to read. Defaults to the first existing of ~/.bashrc, ~/.bash_profile
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// PowerShell profile to append to. Defaults to $PROFILE as reported by PowerShell
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Print the generated block instead of writing it
        #[arg(long, default_value = "false")]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },

    /// List third-party imports of a Python file and suggest an install command
    Deps {
        /// Python source file to scan
        file: PathBuf,

        /// Do not ask a Python interpreter where unknown modules live
        #[arg(long, default_value = "false")]
        no_python: bool,
    },

    /// Scrape a webpage into structured JSON
    #[command(after_help = "Examples:\n  utilkit scrape https://example.com\n  utilkit scrape https://example.com --out results/output.json")]
    Scrape {
        /// URL of the webpage to scrape
        url: String,

        /// Output file to save JSON (prints to stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Ignore HTTP(S)_PROXY environment variables
        #[arg(long, default_value = "false")]
        no_proxy: bool,
    },

    /// Download a webpage with its images, scripts and stylesheets into a folder
    #[command(after_help = "Examples:\n  utilkit download https://example.com --out site_copy")]
    Download {
        /// URL of the webpage to download
        url: String,

        /// Output folder to store page and assets
        #[arg(short, long)]
        out: PathBuf,

        /// Ignore HTTP(S)_PROXY environment variables
        #[arg(long, default_value = "false")]
        no_proxy: bool,
    },

    /// Shallow-clone a GitHub, GitLab or Codeberg repository into <owner>-<repo>
    Clone {
        /// Repository URL (HTTPS or SSH)
        url: String,

        /// Directory to clone into
        #[arg(default_value = ".")]
        target: PathBuf,

        /// Print the resolved directory and git command without cloning
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Open a window showing a single label
    #[cfg(feature = "gui")]
    Hello {
        /// Text of the label
        #[arg(long, default_value = "Hello from utilkit!")]
        label: String,
    },
}
