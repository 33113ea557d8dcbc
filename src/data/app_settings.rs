use crate::data::persistence::{Persistable, resolve_in};
use crate::nav::ViewMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TIMETABLE_FILE: &str = "lukkari.txt";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Relative to the data directory unless absolute.
    pub timetable_file: String,
    pub start_view: ViewMode,
    pub skip_weekends: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            timetable_file: DEFAULT_TIMETABLE_FILE.to_string(),
            start_view: ViewMode::Day,
            skip_weekends: true,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }

    pub fn timetable_path(&self, data_dir: &Path) -> PathBuf {
        resolve_in(data_dir, &self.timetable_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.timetable_file, "lukkari.txt");
        assert_eq!(settings.start_view, ViewMode::Day);
        assert!(settings.skip_weekends);
    }

    #[test]
    fn test_settings_wrapper_yaml_roundtrip() {
        let wrapper = SettingsWrapper {
            settings: AppSettings {
                timetable_file: "/srv/spring.txt".to_string(),
                start_view: ViewMode::Month,
                skip_weekends: false,
            },
        };
        let yaml = serde_norway::to_string(&wrapper).unwrap();
        assert!(yaml.contains("start_view: month"));
        let parsed: SettingsWrapper = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(parsed.settings, wrapper.settings);
    }

    #[test]
    fn test_settings_wrapper_missing_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, AppSettings::default());
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let wrapper: SettingsWrapper =
            serde_norway::from_str("settings:\n  start_view: week\n").unwrap();
        assert_eq!(wrapper.settings.start_view, ViewMode::Week);
        assert_eq!(wrapper.settings.timetable_file, "lukkari.txt");
        assert!(wrapper.settings.skip_weekends);
    }

    #[test]
    fn test_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let settings = AppSettings {
            start_view: ViewMode::Week,
            ..AppSettings::default()
        };
        settings.save_to(tmp.path()).unwrap();
        assert_eq!(AppSettings::load_from(tmp.path()).unwrap(), settings);
    }

    #[test]
    fn test_timetable_path_resolves_against_data_dir() {
        let settings = AppSettings::default();
        let path = settings.timetable_path(Path::new("/home/me/.lukkari"));
        assert_eq!(path, PathBuf::from("/home/me/.lukkari/lukkari.txt"));
    }
}
