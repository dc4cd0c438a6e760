//! Python dependency scanner
//!
//! Collects the root module of every import in one source file and sorts
//! them into builtin, standard library, local and third-party.

pub mod imports;
pub mod locator;
pub mod stdlib;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use imports::{extract_imports, root_module};
pub use locator::{ModuleLocator, ModuleOrigin, NullLocator, PythonLocator};

/// Path segments that mark an installed (non-bundled) package.
const INSTALL_SEGMENTS: [&str; 2] = ["site-packages", "dist-packages"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error near line {line}")]
    Syntax { line: usize },

    #[error("Python grammar unavailable: {0}")]
    Grammar(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModuleKind {
    Builtin,
    Stdlib,
    Local,
    ThirdParty,
}

impl ModuleKind {
    pub fn label(self) -> &'static str {
        match self {
            ModuleKind::Builtin => "builtin",
            ModuleKind::Stdlib => "stdlib",
            ModuleKind::Local => "local",
            ModuleKind::ThirdParty => "third-party",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedModule {
    pub name: String,
    pub kind: ModuleKind,
    pub origin: Option<String>,
}

/// Result of scanning one file
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub path: PathBuf,
    /// Sorted by module name
    pub modules: Vec<ClassifiedModule>,
}

impl ScanReport {
    pub fn third_party(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|m| m.kind == ModuleKind::ThirdParty)
            .map(|m| m.name.as_str())
            .collect()
    }

    /// `uv pip install a b c`; bare `uv pip install` when nothing is third-party
    pub fn install_command(&self) -> String {
        let mut command = String::from("uv pip install");
        for name in self.third_party() {
            command.push(' ');
            command.push_str(name);
        }
        command
    }
}

fn has_install_segment(origin: &str) -> bool {
    let normalized = origin.replace('\\', "/");
    normalized
        .split('/')
        .any(|segment| INSTALL_SEGMENTS.contains(&segment))
}

fn is_local_module(name: &str, script_dir: &Path) -> bool {
    script_dir.join(format!("{}.py", name)).is_file() || script_dir.join(name).is_dir()
}

/// Classify one root module name. `origin` is the locator's answer for it.
pub fn classify(name: &str, origin: &ModuleOrigin, script_dir: &Path) -> ClassifiedModule {
    let (kind, origin) = if stdlib::is_builtin(name) {
        (ModuleKind::Builtin, None)
    } else if stdlib::is_known_stdlib(name) {
        (ModuleKind::Stdlib, None)
    } else if is_local_module(name, script_dir) {
        (ModuleKind::Local, None)
    } else {
        match origin {
            ModuleOrigin::Found(path) if has_install_segment(path) => {
                (ModuleKind::ThirdParty, Some(path.clone()))
            }
            ModuleOrigin::Found(path) => (ModuleKind::Stdlib, Some(path.clone())),
            ModuleOrigin::Missing => (ModuleKind::ThirdParty, None),
        }
    };

    ClassifiedModule {
        name: name.to_string(),
        kind,
        origin,
    }
}

/// Scan `path` and classify every imported root module.
pub fn resolve_dependencies(
    path: &Path,
    locator: &dyn ModuleLocator,
) -> Result<ScanReport, ScanError> {
    let source = fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let imports = extract_imports(&source)?;
    let script_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // Only ask the interpreter about names the static lists cannot settle.
    let unresolved: Vec<String> = imports
        .iter()
        .filter(|name| !stdlib::is_builtin(name) && !stdlib::is_known_stdlib(name))
        .filter(|name| !is_local_module(name, script_dir))
        .cloned()
        .collect();
    let located = locator.locate(&unresolved);

    let modules = imports
        .iter()
        .map(|name| {
            let origin = located.get(name).unwrap_or(&ModuleOrigin::Missing);
            classify(name, origin, script_dir)
        })
        .collect();

    Ok(ScanReport {
        path: path.to_path_buf(),
        modules,
    })
}
