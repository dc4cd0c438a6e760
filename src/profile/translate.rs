//! Single-pass bash -> PowerShell line translation
//!
//! Every line is classified in a fixed priority order and the first rule that
//! matches wins. The only state carried between lines is whether we are inside
//! a `name() { ... }` body, see [`ParseState`].

use std::sync::LazyLock;

use regex::Regex;

static EXPORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^export\s+(\w+)=(.+)").unwrap());

static ALIAS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^alias\s+(\w+)=['"](.+)['"]"#).unwrap());

// `name() {`, `function name() {` and `function name {`
static FUNCTION_OPEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:function\s+(\w+)\s*(?:\(\)\s*)?\{|(\w+)\s*\(\)\s*\{)").unwrap()
});

/// Lines written ahead of the translated block.
pub const PROFILE_HEADER: [&str; 2] = [
    "# --- AUTO-GENERATED FROM BASHRC ---",
    "# Use '$IsWindows' or '$IsLinux' for platform-specific blocks if needed",
];

/// Parser state between lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    Outside,
    InFunction { name: String, body: Vec<String> },
}

/// Output of a translation pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    /// Translated PowerShell statements, one per entry, without trailing newlines
    pub lines: Vec<String>,
    /// Functions never closed, in order: reopened by a later opener or still open
    /// at end of input. Their bodies are not emitted.
    pub unterminated: Vec<String>,
}

impl Translation {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Translate a sequence of bash profile lines.
pub fn translate_lines<I, S>(lines: I) -> Translation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut unterminated = Vec::new();
    let mut state = ParseState::Outside;

    for line in lines {
        let stripped = line.as_ref().trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        if let Some(assignment) = translate_export(stripped) {
            out.push(assignment);
            continue;
        }

        if let Some(alias) = translate_alias(stripped) {
            out.push(alias);
            continue;
        }

        if let Some(name) = function_opener(stripped) {
            if let ParseState::InFunction { name: open, .. } = state {
                unterminated.push(open);
            }
            state = ParseState::InFunction {
                name,
                body: Vec::new(),
            };
            continue;
        }

        if let ParseState::InFunction { name, body } = &mut state {
            if stripped == "}" {
                out.push(format!(
                    "function {} {{ {} }}",
                    name,
                    substitute_positional_args(&body.join(" "))
                ));
                state = ParseState::Outside;
            } else {
                body.push(stripped.to_string());
            }
        }
    }

    if let ParseState::InFunction { name, .. } = state {
        unterminated.push(name);
    }

    Translation {
        lines: out,
        unterminated,
    }
}

/// `export NAME=VALUE` -> `$env:NAME = "VALUE"`
pub fn translate_export(line: &str) -> Option<String> {
    let caps = EXPORT_PATTERN.captures(line)?;
    let value = caps[2]
        .trim_matches(|c| c == '\'' || c == '"')
        .replace('$', "$env:");
    Some(format!("$env:{} = \"{}\"", &caps[1], value))
}

/// `alias name='cmd'`: commands with arguments need a forwarding function.
pub fn translate_alias(line: &str) -> Option<String> {
    let caps = ALIAS_PATTERN.captures(line)?;
    let (name, command) = (&caps[1], &caps[2]);
    if command.contains(' ') {
        Some(format!("function {} {{ {} @args }}", name, command))
    } else {
        Some(format!(
            "Set-Alias -Name {} -Value {} -ErrorAction SilentlyContinue",
            name, command
        ))
    }
}

fn function_opener(line: &str) -> Option<String> {
    let caps = FUNCTION_OPEN_PATTERN.captures(line)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// `$1` -> `$args[0]`, `$2` -> `$args[1]`, `$@` -> `@args`
pub fn substitute_positional_args(body: &str) -> String {
    body.replace("$1", "$args[0]")
        .replace("$2", "$args[1]")
        .replace("$@", "@args")
}

/// Header plus translated lines, newline-terminated, ready to append.
pub fn render_profile(translation: &Translation) -> String {
    let mut content = String::from("\n");
    let lines = translation.lines.iter().map(String::as_str);
    for line in PROFILE_HEADER.iter().copied().chain(lines) {
        content.push_str(line);
        content.push('\n');
    }
    content
}
