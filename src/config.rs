use std::path::PathBuf;

use clap::Parser;

/// File loaded at startup when no path is given.
pub const DEFAULT_DATA_FILE: &str = "dados-imersao-final.csv";

/// Interactive salary dashboard for data careers.
#[derive(Debug, Clone, Parser)]
#[command(name = "salary-dashboard", version, about)]
pub struct DashboardConfig {
    /// Salary records to open (.csv, .json or .parquet).
    #[arg(env = "SALARY_DASHBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// Initial window width in points.
    #[arg(long, default_value_t = 1400.0)]
    pub width: f32,

    /// Initial window height in points.
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}

impl DashboardConfig {
    /// The file to open at startup, if any.
    ///
    /// An explicit path is returned as-is so a typo surfaces as a load
    /// error; the default file is only used when it exists.
    pub fn startup_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.data {
            return Some(path.clone());
        }
        let fallback = PathBuf::from(DEFAULT_DATA_FILE);
        if fallback.is_file() {
            Some(fallback)
        } else {
            log::warn!("{DEFAULT_DATA_FILE} not found; open a file via File → Open…");
            None
        }
    }
}
