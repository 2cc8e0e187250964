use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

const SETTINGS_DIR: &str = ".buildline";
const SETTINGS_FILE: &str = "setting.json";
const LOG_FILE: &str = "buildline.log";

pub const DEFAULT_MONTH_CELL_WIDTH: u16 = 4;
pub const DEFAULT_DAY_CELL_WIDTH: u16 = 2;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub projects_file: Option<String>,
    /// Fixed reference date (`YYYY-MM-DD`) used instead of the clock.
    #[serde(default)]
    pub today: Option<String>,
    #[serde(default)]
    pub month_cell_width: Option<u16>,
    #[serde(default)]
    pub day_cell_width: Option<u16>,
}

impl Settings {
    /// Reads `.buildline/setting.json` from `std::env::current_dir()`.
    /// Returns default settings if the file is missing or malformed.
    pub fn load() -> Self {
        Self::load_from(std::env::current_dir().ok())
    }

    fn load_from(cwd: Option<PathBuf>) -> Self {
        let Some(cwd) = cwd else {
            return Self::default();
        };
        let path = Self::path_in(&cwd);
        Self::read_file(&path).unwrap_or_default()
    }

    fn read_file(path: &Path) -> Option<Self> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Returns the path to the settings file relative to a given directory.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_DIR).join(SETTINGS_FILE)
    }

    /// Log file used while the terminal UI owns the screen. Creates the
    /// settings directory if needed.
    pub fn log_path_in(dir: &Path) -> std::io::Result<PathBuf> {
        let settings_dir = dir.join(SETTINGS_DIR);
        fs::create_dir_all(&settings_dir)?;
        Ok(settings_dir.join(LOG_FILE))
    }

    /// The configured reference date, if any.
    pub fn today(&self) -> Result<Option<NaiveDate>> {
        self.today
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .with_context(|| format!("invalid `today` in settings: {s:?}"))
            })
            .transpose()
    }

    pub fn month_cell_width(&self) -> u16 {
        self.month_cell_width
            .filter(|&w| w > 0)
            .unwrap_or(DEFAULT_MONTH_CELL_WIDTH)
    }

    pub fn day_cell_width(&self) -> u16 {
        self.day_cell_width
            .filter(|&w| w > 0)
            .unwrap_or(DEFAULT_DAY_CELL_WIDTH)
    }
}
