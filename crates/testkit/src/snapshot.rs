//! Golden-file snapshots for rendered grids and reports.
//!
//! Values are stored as pretty JSON with object keys sorted, so reordering
//! struct fields never changes a golden file. Set `MDI_UPDATE_SNAPSHOTS=1`
//! to rewrite goldens instead of comparing against them.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that switches snapshot assertions to update mode.
pub const UPDATE_SNAPSHOTS_ENV: &str = "MDI_UPDATE_SNAPSHOTS";

/// Golden file `name` under `<manifest_dir>/tests/snapshots`.
pub fn snapshot_path(manifest_dir: &str, name: &str) -> PathBuf {
    Path::new(manifest_dir).join("tests").join("snapshots").join(name)
}

/// Compare `value` with the golden file at `path`.
///
/// On mismatch the error names the first differing line. In update mode the
/// golden is rewritten and the comparison is skipped.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if update_requested() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating snapshot directory {}", dir.display()))?;
        }
        return fs::write(path, &actual)
            .with_context(|| format!("writing snapshot {}", path.display()));
    }

    let golden = fs::read_to_string(path).with_context(|| {
        format!(
            "no snapshot at {} (set {UPDATE_SNAPSHOTS_ENV}=1 to record it)",
            path.display()
        )
    })?;

    if let Some((line, want, got)) = first_difference(&golden, &actual) {
        bail!(
            "snapshot {} differs at line {line}: expected `{want}`, got `{got}` (set {UPDATE_SNAPSHOTS_ENV}=1 to accept)",
            path.display()
        );
    }
    Ok(())
}

fn update_requested() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn first_difference<'a>(golden: &'a str, actual: &'a str) -> Option<(usize, &'a str, &'a str)> {
    let mut expected = golden.lines();
    let mut got = actual.lines();
    let mut line = 1;
    loop {
        match (expected.next(), got.next()) {
            (None, None) => return None,
            (a, b) if a == b => line += 1,
            (a, b) => return Some((line, a.unwrap_or("<eof>"), b.unwrap_or("<eof>"))),
        }
    }
}

fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = sorted(serde_json::to_value(value).context("serializing snapshot value")?);
    let mut text = serde_json::to_string_pretty(&value).context("formatting snapshot JSON")?;
    text.push('\n');
    Ok(text)
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<_> = map.into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(fields.into_iter().map(|(k, v)| (k, sorted(v))).collect::<Map<_, _>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}
