use std::path::{Path, PathBuf};

use crate::config::format::{detect_format, ConfigFormat, EXTENSIONS};
use crate::config::types::Config;
use crate::SendmailError;

/// Basename of the config file, without extension.
pub const CONFIG_NAME: &str = "sendmail-telegram";

/// Directories searched for a config file, highest priority first:
/// the working directory, `$XDG_CONFIG_HOME`, `$HOME/.config`, then `/etc`.
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(".")];
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        dirs.push(PathBuf::from(xdg));
    }
    if let Some(home) = non_empty_env("HOME") {
        dirs.push(PathBuf::from(home).join(".config"));
    }
    dirs.push(PathBuf::from("/etc"));
    dirs
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Return the first `sendmail-telegram.<ext>` that exists in `dirs`.
///
/// Directories are tried in order; within one directory extensions are
/// tried in [`EXTENSIONS`] order.
pub fn find_config(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| {
            EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{CONFIG_NAME}.{ext}")))
        })
        .find(|candidate| candidate.is_file())
}

/// Locate and load the config from the standard search path.
pub fn discover_config() -> crate::Result<(PathBuf, Config)> {
    let dirs = search_dirs();
    let path = find_config(&dirs).ok_or(SendmailError::ConfigNotFound { searched: dirs })?;
    let config = load_config(&path)?;
    Ok((path, config))
}

pub fn load_config(path: &Path) -> crate::Result<Config> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| SendmailError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = match format {
        ConfigFormat::Yaml => {
            serde_yaml::from_str(&content).map_err(|source| SendmailError::ConfigYaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        ConfigFormat::Toml => toml::from_str(&content).map_err(|source| SendmailError::ConfigToml {
            path: path.to_path_buf(),
            source,
        })?,
        ConfigFormat::Json => {
            serde_json::from_str(&content).map_err(|source| SendmailError::ConfigJson {
                path: path.to_path_buf(),
                source,
            })?
        }
    };
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Destination, ParseMode};

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("config")
    }

    #[test]
    fn test_load_yaml_fixture() {
        let c = load_config(&fixtures_dir().join("sendmail-telegram.yaml")).unwrap();
        assert_eq!(c.token.as_deref(), Some("123456:TEST-TOKEN"));
        assert_eq!(c.catch_all, Destination::Id(1000));
        assert_eq!(c.addr_mapping.get("root@localhost"), Some(&Destination::Id(1001)));
        assert_eq!(
            c.addr_mapping.get("alerts@example.com"),
            Some(&Destination::Username("@ops_alerts".to_string()))
        );
    }

    #[test]
    fn test_load_toml_fixture() {
        let c = load_config(&fixtures_dir().join("sendmail-telegram.toml")).unwrap();
        assert!(c.token.is_none());
        assert_eq!(c.catch_all, Destination::Id(-1001234));
        assert_eq!(c.parse_mode, ParseMode::Html);
        assert!(c.format.contains("{{Subject}}"));
    }

    #[test]
    fn test_load_json_fixture() {
        let c = load_config(&fixtures_dir().join("sendmail-telegram.json")).unwrap();
        assert_eq!(c.catch_all, Destination::Id(0));
        assert_eq!(c.addr_mapping.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/sendmail-telegram.yaml"));
        assert!(matches!(result, Err(SendmailError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_yaml() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        f.write_all(b"catch_all: [unclosed").unwrap();
        assert!(matches!(
            load_config(f.path()),
            Err(SendmailError::ConfigYaml { .. })
        ));
    }

    #[test]
    fn test_load_invalid_toml() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        f.write_all(b"catch_all = ").unwrap();
        assert!(matches!(
            load_config(f.path()),
            Err(SendmailError::ConfigToml { .. })
        ));
    }

    #[test]
    fn test_find_config_prefers_earlier_dir() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("sendmail-telegram.yaml"), "catch_all: 1").unwrap();
        std::fs::write(first.path().join("sendmail-telegram.toml"), "catch_all = 2").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = find_config(&dirs).unwrap();
        assert_eq!(found, first.path().join("sendmail-telegram.toml"));
    }

    #[test]
    fn test_find_config_extension_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sendmail-telegram.json"), "{\"catch_all\": 1}").unwrap();
        std::fs::write(dir.path().join("sendmail-telegram.yml"), "catch_all: 1").unwrap();

        let found = find_config(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(found, dir.path().join("sendmail-telegram.yml"));
    }

    #[test]
    fn test_find_config_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config(&[dir.path().to_path_buf()]).is_none());
    }

    #[test]
    fn test_search_dirs_order() {
        let dirs = search_dirs();
        assert_eq!(dirs.first(), Some(&PathBuf::from(".")));
        assert_eq!(dirs.last(), Some(&PathBuf::from("/etc")));
    }
}
