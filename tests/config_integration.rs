//! Config discovery and address resolution through the public API.

use std::path::PathBuf;

use sendmail_telegram::config::{find_config, load_config, Destination, ParseMode};
use sendmail_telegram::message::MailAddress;
use sendmail_telegram::resolve::resolve;
use sendmail_telegram::SendmailError;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("config")
}

#[test]
fn test_discovered_yaml_config_resolves_addresses() {
    let path = find_config(&[fixtures_dir()]).expect("fixture dir holds a config");
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("yaml"));

    let config = load_config(&path).unwrap();
    assert_eq!(config.parse_mode, ParseMode::Markdown);

    let root = MailAddress::new("root@localhost");
    assert_eq!(resolve(&root, &config), &Destination::Id(1001));

    let alerts: MailAddress = "alerts@example.com".parse().unwrap();
    assert_eq!(
        resolve(&alerts, &config),
        &Destination::Username("@ops_alerts".to_string())
    );

    let stranger: MailAddress = "stranger@example.com".parse().unwrap();
    assert_eq!(resolve(&stranger, &config), &Destination::Id(1000));
}

#[test]
fn test_unsupported_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sendmail-telegram.ini");
    std::fs::write(&path, "catch_all=1").unwrap();
    assert!(matches!(
        load_config(&path),
        Err(SendmailError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_config_without_catch_all_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sendmail-telegram.yaml");
    std::fs::write(&path, "token: abc\naddr_mapping:\n  a@x.com: 1\n").unwrap();
    assert!(matches!(
        load_config(&path),
        Err(SendmailError::ConfigYaml { .. })
    ));
}
