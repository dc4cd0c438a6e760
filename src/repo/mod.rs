//! Clone a hosted git repository into `<owner>-<repo>`

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CloneError {
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Failed to clone {platform} repository ({status})")]
    GitFailed { platform: String, status: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Https,
    Ssh,
}

/// One hosting platform URL shape
#[derive(Debug)]
pub struct RepoPattern {
    pub platform: &'static str,
    pub transport: Transport,
    regex: Regex,
}

impl RepoPattern {
    fn new(platform: &'static str, transport: Transport, pattern: &str) -> Self {
        // Lazy repo capture so a trailing `.git` is never part of the name.
        let full = format!(r"^{}/([^/]+)/([^/]+?)(?:\.git)?/?$", pattern);
        Self {
            platform,
            transport,
            regex: Regex::new(&full).unwrap(),
        }
    }

    fn new_ssh(platform: &'static str, host: &str) -> Self {
        let full = format!(r"^git@{}:([^/]+)/([^/]+?)(?:\.git)?$", host);
        Self {
            platform,
            transport: Transport::Ssh,
            regex: Regex::new(&full).unwrap(),
        }
    }

    pub fn label(&self) -> String {
        let transport = match self.transport {
            Transport::Https => "HTTPS",
            Transport::Ssh => "SSH",
        };
        format!("{} {}", self.platform, transport)
    }

    fn captures<'u>(&self, url: &'u str) -> Option<(&'u str, &'u str)> {
        let caps = self.regex.captures(url)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

/// Tried in order; the first match wins.
pub static REPO_PATTERNS: LazyLock<Vec<RepoPattern>> = LazyLock::new(|| {
    vec![
        RepoPattern::new("GitHub", Transport::Https, r"(?:https?://)?github\.com"),
        RepoPattern::new_ssh("GitHub", r"github\.com"),
        RepoPattern::new("GitLab", Transport::Https, r"(?:https?://)?(?:[\w-]+\.)?gitlab\.com"),
        RepoPattern::new_ssh("GitLab", r"(?:[\w-]+\.)?gitlab\.com"),
        RepoPattern::new(
            "GitLab Subdomain",
            Transport::Https,
            r"(?:https?://)?(?:[\w-]+\.)?gitlab\.[^/:]+",
        ),
        RepoPattern::new_ssh("GitLab Subdomain", r"(?:[\w-]+\.)?gitlab\.[^/:]+"),
        RepoPattern::new("Codeberg", Transport::Https, r"(?:https?://)?codeberg\.org"),
        RepoPattern::new_ssh("Codeberg", r"codeberg\.org"),
    ]
});

/// Where a clone will land
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneTarget {
    pub url: String,
    pub platform: String,
    pub owner: String,
    pub repo: String,
    pub dir_name: String,
    pub path: PathBuf,
}

/// Match `url` against [`REPO_PATTERNS`] and derive `target_dir/<owner>-<repo>`.
pub fn resolve_target(url: &str, target_dir: &Path) -> Result<CloneTarget, CloneError> {
    let url = url.trim();
    REPO_PATTERNS
        .iter()
        .find_map(|pattern| {
            pattern.captures(url).map(|(owner, repo)| {
                let dir_name = format!("{}-{}", owner, repo);
                CloneTarget {
                    url: url.to_string(),
                    platform: pattern.label(),
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    path: target_dir.join(&dir_name),
                    dir_name,
                }
            })
        })
        .ok_or_else(|| CloneError::InvalidUrl(url.to_string()))
}

/// Arguments passed to git for a shallow clone.
pub fn clone_args(target: &CloneTarget) -> Vec<String> {
    vec![
        "clone".to_string(),
        "--depth".to_string(),
        "1".to_string(),
        target.url.clone(),
        target.path.to_string_lossy().into_owned(),
    ]
}

/// Resolve, then run `git clone --depth 1` with inherited stdio.
pub fn clone_repo(url: &str, target_dir: &Path) -> Result<CloneTarget, CloneError> {
    let target = resolve_target(url, target_dir)?;
    let args = clone_args(&target);
    debug!(?args, "running git");

    let status = Command::new("git")
        .args(&args)
        .status()
        .map_err(CloneError::Spawn)?;

    if !status.success() {
        return Err(CloneError::GitFailed {
            platform: target.platform,
            status: status.to_string(),
        });
    }

    Ok(target)
}
