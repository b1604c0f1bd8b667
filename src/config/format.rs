use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

/// Extensions tried, in order, when searching a directory for a config file.
pub const EXTENSIONS: [&str; 4] = ["yaml", "yml", "toml", "json"];

pub fn detect_format(path: &Path) -> crate::Result<ConfigFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "json" => Ok(ConfigFormat::Json),
        "yml" | "yaml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(crate::SendmailError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_yaml_variants() {
        assert_eq!(
            detect_format(Path::new("sendmail-telegram.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("sendmail-telegram.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
    }

    #[test]
    fn test_detect_toml_and_json() {
        assert_eq!(
            detect_format(Path::new("/etc/sendmail-telegram.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            detect_format(Path::new("sendmail-telegram.json")).unwrap(),
            ConfigFormat::Json
        );
    }

    #[test]
    fn test_detect_uppercase_extension() {
        assert_eq!(
            detect_format(Path::new("sendmail-telegram.TOML")).unwrap(),
            ConfigFormat::Toml
        );
    }

    #[test]
    fn test_detect_no_extension() {
        let result = detect_format(Path::new("sendmail-telegram"));
        assert!(matches!(
            result,
            Err(crate::SendmailError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_detect_unknown_extension() {
        let result = detect_format(Path::new("sendmail-telegram.ini"));
        assert!(
            matches!(result, Err(crate::SendmailError::UnsupportedFormat { extension }) if extension == "ini")
        );
    }
}
