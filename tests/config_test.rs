// Integration tests for configuration layering against the real process environment
// Serialised because they mutate environment variables

use std::io::Write;

use pretty_assertions::assert_eq;
use schedule_builder::services::settings::{
    ConfigError, ConfigLoader, ENV_ADMIN_URL, ENV_API_URL, ENV_CONFERENCE, ENV_TIMEOUT,
};
use serial_test::serial;
use tempfile::TempDir;

fn clear_env() {
    for key in [ENV_API_URL, ENV_CONFERENCE, ENV_ADMIN_URL, ENV_TIMEOUT] {
        std::env::remove_var(key);
    }
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
#[serial]
fn test_environment_overrides_config_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
api_url = "https://file.example.org/graphql"
conference_code = "from-file"
"#,
    );
    std::env::set_var(ENV_CONFERENCE, "pycon2025");

    let config = ConfigLoader::from_environment()
        .with_file(&path)
        .with_launch_arg("")
        .load()
        .unwrap();
    clear_env();

    assert_eq!(config.conference_code, "pycon2025");
    assert_eq!(config.api_url, "https://file.example.org/graphql");
}

#[test]
#[serial]
fn test_unsubstituted_env_placeholder_falls_through() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
api_url = "https://file.example.org/graphql"
conference_code = "from-file"
"#,
    );
    std::env::set_var(ENV_CONFERENCE, "{{ CONFERENCE_CODE }}");

    let config = ConfigLoader::from_environment()
        .with_file(&path)
        .with_launch_arg("")
        .load()
        .unwrap();
    clear_env();

    assert_eq!(config.conference_code, "from-file");
}

#[test]
#[serial]
fn test_launch_url_wins_over_environment() {
    clear_env();
    let dir = TempDir::new().unwrap();
    std::env::set_var(ENV_API_URL, "https://env.example.org/graphql");
    std::env::set_var(ENV_CONFERENCE, "env-conf");

    let config = ConfigLoader::from_environment()
        .with_file(dir.path().join("missing.toml"))
        .with_launch_arg("schedule-builder://open?conference=url-conf")
        .load()
        .unwrap();
    clear_env();

    assert_eq!(config.conference_code, "url-conf");
    assert_eq!(config.api_url, "https://env.example.org/graphql");
}

#[test]
#[serial]
fn test_missing_conference_is_an_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    std::env::set_var(ENV_API_URL, "https://env.example.org/graphql");

    let result = ConfigLoader::from_environment()
        .with_file(dir.path().join("missing.toml"))
        .with_launch_arg("")
        .load();
    clear_env();

    assert!(matches!(result, Err(ConfigError::Missing("conference_code"))));
}
