//! Tests for CLI argument parsing and end-to-end subcommand behavior

mod common;

use assert_cmd::Command;
use clap::Parser;
use common::write_fixture;
use predicates::prelude::*;
use std::path::PathBuf;
use utilkit::cli::{Cli, Commands};

fn utilkit() -> Command {
    Command::cargo_bin("utilkit").unwrap()
}

#[test]
fn test_cli_profile_defaults() {
    let cli = Cli::parse_from(["utilkit", "profile"]);

    match cli.command {
        Commands::Profile {
            source,
            dest,
            dry_run,
            yes,
        } => {
            assert!(source.is_none());
            assert!(dest.is_none());
            assert!(!dry_run, "Default dry_run should be false");
            assert!(!yes, "Default yes should be false");
        }
        other => panic!("expected profile, got {:?}", other),
    }
    assert_eq!(cli.verbose, 0);
    assert!(!cli.no_color);
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["utilkit", "deps", "tool.py", "-vv", "--no-color"]);

    assert_eq!(cli.verbose, 2);
    assert!(cli.no_color);
    match cli.command {
        Commands::Deps { file, no_python } => {
            assert_eq!(file, PathBuf::from("tool.py"));
            assert!(!no_python);
        }
        other => panic!("expected deps, got {:?}", other),
    }
}

#[test]
fn test_cli_clone_default_target() {
    let cli = Cli::parse_from(["utilkit", "clone", "git@codeberg.org:alice/proj.git"]);

    match cli.command {
        Commands::Clone { url, target, .. } => {
            assert_eq!(url, "git@codeberg.org:alice/proj.git");
            assert_eq!(target, PathBuf::from("."));
        }
        other => panic!("expected clone, got {:?}", other),
    }
}

#[test]
fn test_cli_download_requires_out() {
    let result = Cli::try_parse_from(["utilkit", "download", "https://example.com"]);
    assert!(result.is_err(), "download without --out should be rejected");

    let cli = Cli::try_parse_from(["utilkit", "download", "https://example.com", "-o", "copy"])
        .unwrap();
    match cli.command {
        Commands::Download { out, no_proxy, .. } => {
            assert_eq!(out, PathBuf::from("copy"));
            assert!(!no_proxy);
        }
        other => panic!("expected download, got {:?}", other),
    }
}

#[test]
fn test_cli_scrape_optional_out() {
    let cli = Cli::parse_from(["utilkit", "scrape", "https://example.com"]);
    match cli.command {
        Commands::Scrape { url, out, .. } => {
            assert_eq!(url, "https://example.com");
            assert!(out.is_none());
        }
        other => panic!("expected scrape, got {:?}", other),
    }
}

#[test]
fn test_clone_rejects_unknown_host() {
    utilkit()
        .args(["clone", "https://example.com/x/y", "--no-color"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid repository URL"));
}

#[test]
fn test_clone_dry_run_prints_target() {
    utilkit()
        .args([
            "clone",
            "https://github.com/octocat/Hello-World.git",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("octocat-Hello-World"))
        .stdout(predicate::str::contains("git clone --depth 1"));
}

#[test]
fn test_deps_prints_install_command() {
    let (_temp_dir, path) = write_fixture("app.py", "import os\nimport requests\nimport numpy\n");

    utilkit()
        .arg("deps")
        .arg(&path)
        .arg("--no-python")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dependencies found:\n- numpy\n- requests\n",
        ))
        .stdout(predicate::str::contains("uv pip install numpy requests"));
}

#[test]
fn test_deps_stdlib_only() {
    let (_temp_dir, path) = write_fixture("tool.py", "import os, sys\nfrom pathlib import Path\n");

    utilkit()
        .arg("deps")
        .arg(&path)
        .arg("--no-python")
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "Dependencies found:\n\nSuggested uv command:\nuv pip install\n",
        ));
}

#[test]
fn test_deps_missing_file_fails() {
    utilkit()
        .args(["deps", "/definitely/not/here.py", "--no-python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to scan"));
}

#[test]
fn test_profile_dry_run_prints_block() {
    let (temp_dir, source) = write_fixture(".bashrc", "alias gs='git status'\n");
    let dest = temp_dir.path().join("profile.ps1");

    utilkit()
        .arg("profile")
        .arg("--source")
        .arg(&source)
        .arg("--dest")
        .arg(&dest)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("# --- AUTO-GENERATED FROM BASHRC ---"))
        .stdout(predicate::str::contains("function gs { git status @args }"));

    assert!(!dest.exists(), "dry run must not write the profile");
}

#[test]
fn test_profile_yes_appends_without_prompt() {
    let (temp_dir, source) = write_fixture(".bashrc", "export EDITOR=vim\n");
    let dest = temp_dir.path().join("profile.ps1");

    utilkit()
        .arg("profile")
        .arg("--source")
        .arg(&source)
        .arg("--dest")
        .arg(&dest)
        .arg("--yes")
        .arg("--no-color")
        .assert()
        .success();

    let written = std::fs::read_to_string(&dest).unwrap();
    assert!(written.ends_with("$env:EDITOR = \"vim\"\n"));
}

#[test]
fn test_profile_warns_for_each_unclosed_function() {
    let (temp_dir, source) = write_fixture(
        ".bashrc",
        "greet() { echo hi; }\nalias g='git'\nmk() {\n  mkdir -p $1\n}\nlast() {\n",
    );
    let dest = temp_dir.path().join("profile.ps1");

    utilkit()
        .arg("profile")
        .arg("--source")
        .arg(&source)
        .arg("--dest")
        .arg(&dest)
        .arg("--dry-run")
        .arg("--no-color")
        .assert()
        .success()
        .stderr(predicate::str::contains("Function 'greet' has no closing"))
        .stderr(predicate::str::contains("Function 'last' has no closing"))
        .stdout(predicate::str::contains("function mk { mkdir -p $args[0] }"));
}

#[test]
fn test_profile_yes_backs_up_existing_profile() {
    let (temp_dir, source) = write_fixture(".bashrc", "alias g='git'\n");
    let dest = temp_dir.path().join("profile.ps1");
    std::fs::write(&dest, "# mine\n").unwrap();

    utilkit()
        .arg("profile")
        .arg("--source")
        .arg(&source)
        .arg("--dest")
        .arg(&dest)
        .arg("--yes")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up existing profile"));

    let backup = temp_dir.path().join("profile.ps1.bak");
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), "# mine\n");
    let written = std::fs::read_to_string(&dest).unwrap();
    assert!(written.starts_with("# mine\n\n# --- AUTO-GENERATED FROM BASHRC ---\n"));
}
