use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Contents of `config.toml` in the platform config dir
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    /// Base URL of the remote store; absent = offline operation
    #[serde(default)]
    pub api_url: Option<String>,
    /// Override for the data dir holding cache.json / sync.log
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Effective configuration after applying CLI flags over the file
#[derive(Debug, Clone)]
pub struct Resolved {
    pub api_url: Option<String>,
    pub data_dir: PathBuf,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "taskdeck")
}

/// Read `config.toml`. Missing or malformed files read as defaults; the
/// flags can always override.
pub fn read_file_config() -> FileConfig {
    let Some(dirs) = project_dirs() else {
        return FileConfig::default();
    };
    let path = dirs.config_dir().join("config.toml");
    fs::read_to_string(&path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

/// Default data dir when neither the file nor a flag names one
pub fn default_data_dir() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => PathBuf::from(".taskdeck"),
    }
}

/// Precedence: CLI flag over config file over platform default.
/// `offline` wins over every api_url source.
pub fn resolve(
    file: FileConfig,
    api_url_flag: Option<String>,
    data_dir_flag: Option<PathBuf>,
    offline: bool,
    fallback_data_dir: PathBuf,
) -> Resolved {
    let api_url = if offline {
        None
    } else {
        api_url_flag.or(file.api_url)
    };
    let data_dir = data_dir_flag
        .or(file.data_dir)
        .unwrap_or(fallback_data_dir);
    Resolved { api_url, data_dir }
}

/// Resolve from the real config file and ensure the data dir exists
pub fn load(
    api_url_flag: Option<String>,
    data_dir_flag: Option<PathBuf>,
    offline: bool,
) -> std::io::Result<Resolved> {
    let resolved = resolve(
        read_file_config(),
        api_url_flag,
        data_dir_flag,
        offline,
        default_data_dir(),
    );
    fs::create_dir_all(&resolved.data_dir)?;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file_config(api_url: Option<&str>, data_dir: Option<&str>) -> FileConfig {
        FileConfig {
            api_url: api_url.map(str::to_string),
            data_dir: data_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn flag_overrides_file() {
        let resolved = resolve(
            file_config(Some("http://file:1"), Some("/from-file")),
            Some("http://flag:2".into()),
            Some(PathBuf::from("/from-flag")),
            false,
            PathBuf::from("/fallback"),
        );
        assert_eq!(resolved.api_url.as_deref(), Some("http://flag:2"));
        assert_eq!(resolved.data_dir, PathBuf::from("/from-flag"));
    }

    #[test]
    fn file_overrides_fallback() {
        let resolved = resolve(
            file_config(Some("http://file:1"), Some("/from-file")),
            None,
            None,
            false,
            PathBuf::from("/fallback"),
        );
        assert_eq!(resolved.api_url.as_deref(), Some("http://file:1"));
        assert_eq!(resolved.data_dir, PathBuf::from("/from-file"));
    }

    #[test]
    fn fallback_when_nothing_set() {
        let resolved = resolve(
            FileConfig::default(),
            None,
            None,
            false,
            PathBuf::from("/fallback"),
        );
        assert!(resolved.api_url.is_none());
        assert_eq!(resolved.data_dir, PathBuf::from("/fallback"));
    }

    #[test]
    fn offline_discards_every_api_url() {
        let resolved = resolve(
            file_config(Some("http://file:1"), None),
            Some("http://flag:2".into()),
            None,
            true,
            PathBuf::from("/fallback"),
        );
        assert!(resolved.api_url.is_none());
    }

    #[test]
    fn malformed_toml_reads_as_default() {
        let parsed: Result<FileConfig, _> = toml::from_str("api_url = [not a string]");
        assert!(parsed.is_err());
        // read_file_config maps that to defaults via .ok()
        let fallback: FileConfig = toml::from_str("").unwrap();
        assert_eq!(fallback, FileConfig::default());
    }
}
