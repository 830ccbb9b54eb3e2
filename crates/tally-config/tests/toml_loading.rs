//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail, whose temp directory becomes the working directory,
//! so a `tally.toml` created in the jail is picked up as the project file.

use std::path::PathBuf;

use figment::Jail;
use pretty_assertions::assert_eq;
use tally_config::{ChartConfig, LogConfig, TallyConfig};

/// Keep the user-level config lookup inside the jail so a developer's own
/// `~/.config/tally/config.toml` never leaks into these tests.
fn sandbox_home(jail: &mut Jail) {
    let home = jail.directory().to_path_buf();
    jail.set_env("HOME", home.display());
    jail.set_env("XDG_CONFIG_HOME", home.join(".config").display());
}

#[test]
fn loads_project_toml() {
    Jail::expect_with(|jail| {
        sandbox_home(jail);
        jail.create_file(
            "tally.toml",
            r#"
interval_secs = 2
live_data_path = "data/project_live.json"
sqlite_path = "data/buzz.sqlite"

[log]
filter = "tally_cli=debug,info"

[chart]
height = 16
"#,
        )?;

        let config = TallyConfig::load().expect("config loads");
        assert_eq!(
            config,
            TallyConfig {
                interval_secs: 2,
                live_data_path: PathBuf::from("data/project_live.json"),
                sqlite_path: PathBuf::from("data/buzz.sqlite"),
                log: LogConfig {
                    filter: "tally_cli=debug,info".to_string(),
                    path: None,
                },
                chart: ChartConfig {
                    height: 16,
                    headless: false,
                },
            }
        );
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        sandbox_home(jail);
        jail.create_file(
            "tally.toml",
            r#"
interval_secs = 2
live_data_path = "from_toml.jsonl"
sqlite_path = "from_toml.sqlite"
"#,
        )?;
        jail.set_env("TALLY_SQLITE_PATH", "from_env.sqlite");

        let config = TallyConfig::load().expect("config loads");
        assert_eq!(config.live_data_path, PathBuf::from("from_toml.jsonl"));
        assert_eq!(config.sqlite_path, PathBuf::from("from_env.sqlite"));
        Ok(())
    });
}

#[test]
fn invalid_toml_value_fails() {
    Jail::expect_with(|jail| {
        sandbox_home(jail);
        jail.create_file(
            "tally.toml",
            r#"
interval_secs = 0
live_data_path = "live.jsonl"
sqlite_path = "store.sqlite"
"#,
        )?;

        let err = TallyConfig::load().unwrap_err();
        assert!(err.to_string().contains("interval_secs"), "{err}");
        Ok(())
    });
}

#[test]
fn user_config_is_the_lowest_layer() {
    Jail::expect_with(|jail| {
        sandbox_home(jail);
        let user_dir = dirs::config_dir().expect("config dir").join("tally");
        std::fs::create_dir_all(&user_dir).expect("user config dir");
        std::fs::write(
            user_dir.join("config.toml"),
            r#"
interval_secs = 9
live_data_path = "user.jsonl"
sqlite_path = "user.sqlite"

[chart]
height = 30
"#,
        )
        .expect("user config");
        jail.create_file("tally.toml", "interval_secs = 3\n")?;

        let config = TallyConfig::load().expect("config loads");
        assert_eq!(config.interval_secs, 3);
        assert_eq!(config.live_data_path, PathBuf::from("user.jsonl"));
        assert_eq!(config.chart.height, 30);
        Ok(())
    });
}
