//! Resolving module locations through an installed Python interpreter

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, warn};

/// Where a module resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOrigin {
    /// Import machinery could not find the module
    Missing,
    /// Found; the origin may be empty for namespace packages
    Found(String),
}

/// Looks up where importable modules live.
pub trait ModuleLocator {
    fn locate(&self, names: &[String]) -> BTreeMap<String, ModuleOrigin>;
}

/// Resolves nothing. Used with `--no-python` or when no interpreter exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLocator;

impl ModuleLocator for NullLocator {
    fn locate(&self, names: &[String]) -> BTreeMap<String, ModuleOrigin> {
        names
            .iter()
            .map(|n| (n.clone(), ModuleOrigin::Missing))
            .collect()
    }
}

// Prints `name\t<0|1>\torigin` per argument.
const FIND_SPEC_SCRIPT: &str = r#"
import importlib.util, sys
for name in sys.argv[1:]:
    try:
        spec = importlib.util.find_spec(name)
    except Exception:
        spec = None
    if spec is None:
        print(name + "\t0\t")
    else:
        print(name + "\t1\t" + (spec.origin or ""))
"#;

/// Asks a Python interpreter's `importlib.util.find_spec` in one batch.
#[derive(Debug, Clone)]
pub struct PythonLocator {
    interpreter: PathBuf,
}

impl PythonLocator {
    pub fn new(interpreter: PathBuf) -> Self {
        Self { interpreter }
    }

    /// First of `python3`, `python` found on PATH.
    pub fn discover() -> Option<Self> {
        ["python3", "python"]
            .iter()
            .find_map(|name| which::which(name).ok())
            .map(Self::new)
    }
}

impl ModuleLocator for PythonLocator {
    fn locate(&self, names: &[String]) -> BTreeMap<String, ModuleOrigin> {
        let mut located = NullLocator.locate(names);
        if names.is_empty() {
            return located;
        }

        let output = Command::new(&self.interpreter)
            .arg("-I")
            .arg("-c")
            .arg(FIND_SPEC_SCRIPT)
            .args(names)
            .output();

        let output = match output {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                warn!(
                    interpreter = %self.interpreter.display(),
                    status = %output.status,
                    "module lookup failed; treating unknown modules as third-party"
                );
                return located;
            }
            Err(err) => {
                warn!(
                    interpreter = %self.interpreter.display(),
                    error = %err,
                    "could not run Python; treating unknown modules as third-party"
                );
                return located;
            }
        };

        for (name, origin) in parse_locator_output(&String::from_utf8_lossy(&output.stdout)) {
            debug!(module = %name, ?origin, "located");
            located.insert(name, origin);
        }
        located
    }
}

/// Parse the `name\tfound\torigin` lines printed by the lookup script.
pub fn parse_locator_output(stdout: &str) -> Vec<(String, ModuleOrigin)> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '\t');
            let name = parts.next()?.trim();
            let found = parts.next()?;
            let origin = parts.next().unwrap_or("");
            if name.is_empty() {
                return None;
            }
            let origin = if found == "1" {
                ModuleOrigin::Found(origin.to_string())
            } else {
                ModuleOrigin::Missing
            };
            Some((name.to_string(), origin))
        })
        .collect()
}
