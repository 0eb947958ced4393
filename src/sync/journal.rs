use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

/// Cap on the journal size before the oldest half is trimmed (64 KB)
const MAX_JOURNAL_SIZE: u64 = 65_536;

/// Path of the sync journal inside the data dir
pub fn journal_path(data_dir: &Path) -> PathBuf {
    data_dir.join("sync.log")
}

/// Append a one-line entry. The TUI cannot print to stderr while the
/// alternate screen is active, so push failures and load fallbacks land
/// here instead. Failures to journal are swallowed — the journal is an
/// aid, never a dependency.
pub fn append(data_dir: &Path, message: &str) {
    let path = journal_path(data_dir);
    trim_if_oversized(&path);
    let line = format!(
        "{} {}\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        message.replace('\n', " ")
    );
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut f| f.write_all(line.as_bytes()));
}

/// Read all journal lines, oldest first
pub fn read_entries(data_dir: &Path) -> Vec<String> {
    fs::read_to_string(journal_path(data_dir))
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn trim_if_oversized(path: &Path) {
    let Ok(meta) = fs::metadata(path) else { return };
    if meta.len() <= MAX_JOURNAL_SIZE {
        return;
    }
    if let Ok(content) = fs::read_to_string(path) {
        let lines: Vec<&str> = content.lines().collect();
        let keep = &lines[lines.len() / 2..];
        let _ = fs::write(path, format!("{}\n", keep.join("\n")));
    }
}
