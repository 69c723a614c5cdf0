use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Printed when the crawler produced nothing usable.
pub const EMPTY_RESULT: &str = "{}";

/// Environment variable overriding the crawler binary location.
pub const CRAWLER_BIN_ENV: &str = "LINKEDIN_CRAWLER_BIN";

const CRAWLER_BIN: &str = "linkedin_crawler";

/// Pull the JSON document out of the crawler's stdout.
///
/// Strips a UTF-8 BOM and surrounding noise and keeps the outermost `{...}`
/// span. Only when that span is not valid JSON is the last line holding a
/// whole object used instead. Anything else becomes `{}`.
pub fn clean_output(raw: &str) -> String {
    let text = raw.trim_start_matches('\u{feff}').trim();

    let span = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    };

    if is_json(span) {
        return span.to_string();
    }

    span.lines()
        .rev()
        .map(str::trim)
        .filter(|line| line.starts_with('{') && line.ends_with('}'))
        .find(|line| is_json(line))
        .unwrap_or(EMPTY_RESULT)
        .to_string()
}

fn is_json(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Crawler binary: `$LINKEDIN_CRAWLER_BIN`, else next to the current executable.
pub fn crawler_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CRAWLER_BIN_ENV) {
        return PathBuf::from(path);
    }
    let name = format!("{}{}", CRAWLER_BIN, std::env::consts::EXE_SUFFIX);
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&name)))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Run the crawler with `args`, discarding its stderr, and return the cleaned
/// stdout. Any failure yields `{}`; the wrapper itself never logs.
pub fn run_isolated(program: &Path, args: &[OsString]) -> String {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            if stdout.trim().is_empty() {
                EMPTY_RESULT.to_string()
            } else {
                clean_output(&stdout)
            }
        }
        _ => EMPTY_RESULT.to_string(),
    }
}
