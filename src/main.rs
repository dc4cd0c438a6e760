//! utilkit: command-line entry point
//!
//! Parses arguments, sets up styling and logging, then hands off to the
//! runner for the chosen subcommand.

use anyhow::Result;
use clap::Parser;

use utilkit::cli::{
    default_entries, run_clone, run_deps, run_download, run_menu, run_profile, run_scrape, Cli,
    Commands,
};
use utilkit::utils::init_logging;
use utilkit::web::FetchOptions;

fn fetch_options(no_proxy: bool) -> FetchOptions {
    FetchOptions {
        use_proxy: !no_proxy,
        ..FetchOptions::default()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_logging(cli.verbose, !cli.no_color && console::colors_enabled_stderr());

    match &cli.command {
        Commands::Menu => run_menu(default_entries()),
        Commands::Profile {
            source,
            dest,
            dry_run,
            yes,
        } => run_profile(source.as_deref(), dest.as_deref(), *dry_run, *yes),
        Commands::Deps { file, no_python } => run_deps(file, !no_python, cli.verbose > 0),
        Commands::Scrape { url, out, no_proxy } => {
            run_scrape(url, out.as_deref(), &fetch_options(*no_proxy))
        }
        Commands::Download { url, out, no_proxy } => {
            run_download(url, out, &fetch_options(*no_proxy))
        }
        Commands::Clone {
            url,
            target,
            dry_run,
        } => run_clone(url, target, *dry_run),
        #[cfg(feature = "gui")]
        Commands::Hello { label } => utilkit::gui::run_hello_window(label),
    }
}
