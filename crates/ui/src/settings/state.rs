use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

use crate::chat::ClockFormat;

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const SETTINGS_DIRECTORY_NAME: &str = "murmur";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const SETTINGS_ENV_PREFIX: &str = "MURMUR_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Viewport signal used until the host reports a breakpoint change.
    #[serde(default)]
    pub narrow_mode: bool,
    #[serde(default)]
    pub clock: ClockFormat,
    /// Seed document for the roster and history. Built-in demo data when unset.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            narrow_mode: false,
            clock: ClockFormat::default(),
            seed_path: None,
            log_filter: default_log_filter(),
        }
    }
}

impl ViewSettings {
    pub fn normalized(mut self) -> Self {
        self.log_filter = self.log_filter.trim().to_string();
        if self.log_filter.is_empty() {
            self.log_filter = default_log_filter();
        }

        // Blank paths come from hand-edited files; treat them as "use the demo roster".
        self.seed_path = self
            .seed_path
            .filter(|path| !path.as_os_str().is_empty());

        self
    }
}

pub struct SettingsStore {
    settings: Arc<ArcSwap<ViewSettings>>,
    config_path: PathBuf,
}

impl SettingsStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".murmur"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn new(config_path: PathBuf) -> Self {
        let settings = Self::load_from_sources(&config_path, Env::prefixed(SETTINGS_ENV_PREFIX));
        Self {
            settings: Arc::new(ArcSwap::from_pointee(settings)),
            config_path,
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> Arc<ViewSettings> {
        self.settings.load_full()
    }

    pub fn update(&self, settings: ViewSettings) -> Result<(), SettingsError> {
        let normalized_settings = settings.normalized();
        self.persist(&normalized_settings)?;
        self.settings.store(Arc::new(normalized_settings));
        Ok(())
    }

    pub(crate) fn load_from_sources(path: &Path, env: Env) -> ViewSettings {
        let mut figment = Figment::from(Serialized::defaults(ViewSettings::default()));
        if path.exists() {
            figment = figment.merge(Json::file(path));
        } else {
            tracing::info!("settings file not found at {:?}, using defaults", path);
        }
        figment = figment.merge(env);

        match figment.extract::<ViewSettings>() {
            Ok(settings) => settings.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to parse settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                ViewSettings::default()
            }
        }
    }

    fn persist(&self, settings: &ViewSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context(CreateDirSnafu {
                stage: "create-settings-directory",
                path: parent.to_path_buf(),
            })?;
        }

        let content = serde_json::to_string_pretty(settings).context(SerializeConfigSnafu {
            stage: "serialize-settings-json",
        })?;

        let temp_path = self.config_path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).context(WriteFileSnafu {
            stage: "write-temporary-settings-file",
            path: temp_path.clone(),
        })?;

        std::fs::rename(&temp_path, &self.config_path).context(RenameTempFileSnafu {
            stage: "rename-temporary-settings-file",
            from: temp_path,
            to: self.config_path.clone(),
        })?;

        tracing::info!("saved settings to {:?}", self.config_path);
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to create settings directory at {path:?} on `{stage}`: {source}"))]
    CreateDir {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to serialize settings on `{stage}`: {source}"))]
    SerializeConfig {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("failed to write settings file at {path:?} on `{stage}`: {source}"))]
    WriteFile {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "failed to replace settings file from {from:?} to {to:?} on `{stage}`: {source}"
    ))]
    RenameTempFile {
        stage: &'static str,
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Prefix nothing in the test environment sets, so ambient MURMUR_* variables stay out.
    fn isolated_env() -> Env {
        Env::prefixed("MURMUR_SETTINGS_TEST_UNUSED_")
    }

    #[test]
    fn missing_file_yields_defaults() {
        let directory = tempfile::tempdir().expect("tempdir");
        let path = directory.path().join("settings.json");

        let settings = SettingsStore::load_from_sources(&path, isolated_env());
        assert_eq!(settings, ViewSettings::default());
        assert_eq!(settings.clock, ClockFormat::TwelveHour);
    }

    #[test]
    fn file_values_override_defaults() {
        let directory = tempfile::tempdir().expect("tempdir");
        let path = directory.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"narrow_mode": true, "clock": "twenty_four_hour", "log_filter": "  "}"#,
        )
        .expect("write settings");

        let settings = SettingsStore::load_from_sources(&path, isolated_env());
        assert!(settings.narrow_mode);
        assert_eq!(settings.clock, ClockFormat::TwentyFourHour);
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(settings.seed_path, None);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let directory = tempfile::tempdir().expect("tempdir");
        let path = directory.path().join("settings.json");
        std::fs::write(&path, r#"{"clock": "sundial"}"#).expect("write settings");

        let settings = SettingsStore::load_from_sources(&path, isolated_env());
        assert_eq!(settings, ViewSettings::default());
    }

    #[test]
    fn prefixed_environment_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                SETTINGS_FILE_NAME,
                r#"{"narrow_mode": false, "clock": "twelve_hour", "log_filter": "debug"}"#,
            )?;
            jail.set_env("MURMUR_NARROW_MODE", "true");
            jail.set_env("MURMUR_CLOCK", "twenty_four_hour");

            let settings = SettingsStore::load_from_sources(
                Path::new(SETTINGS_FILE_NAME),
                Env::prefixed(SETTINGS_ENV_PREFIX),
            );
            assert!(settings.narrow_mode);
            assert_eq!(settings.clock, ClockFormat::TwentyFourHour);
            assert_eq!(settings.log_filter, "debug");
            Ok(())
        });
    }

    #[test]
    fn update_persists_and_swaps_settings() {
        let directory = tempfile::tempdir().expect("tempdir");
        let path = directory.path().join("nested").join("settings.json");
        let store = SettingsStore::new(path.clone());

        let updated = ViewSettings {
            narrow_mode: true,
            seed_path: Some(PathBuf::from("seed.json")),
            ..ViewSettings::default()
        };
        store.update(updated.clone()).expect("persist settings");

        assert_eq!(*store.settings(), updated);
        let reloaded = SettingsStore::load_from_sources(&path, isolated_env());
        assert_eq!(reloaded, updated);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
