use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::diagnostic::rules::DEFAULT_SEUIL_RENTABILITE;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cabinet: CabinetConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CabinetConfig {
    #[serde(default)]
    pub nom: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatasetConfig {
    /// Path to a JSON portfolio; empty means the built-in sample.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_seuil_rentabilite")]
    pub seuil_rentabilite: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_enable_stdout")]
    pub enable_stdout: bool,
    #[serde(default)]
    pub rules: AlertRulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRulesConfig {
    #[serde(default = "default_true")]
    pub diagnostic_degrade: bool,
    #[serde(default = "default_true")]
    pub retour_equilibre: bool,
    #[serde(default = "default_true")]
    pub diagnostic_change: bool,
    #[serde(default = "default_true")]
    pub plan_en_retard: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dataset_path: Option<String>,
    pub seuil_rentabilite: Option<f64>,
    pub page_size: Option<usize>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/cabinet-pulse/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.dataset_path {
            self.dataset.path = path;
        }
        if let Some(seuil) = overrides.seuil_rentabilite {
            self.analysis.seuil_rentabilite = seuil;
        }
        if let Some(page_size) = overrides.page_size {
            self.listing.page_size = page_size;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_dataset_path(&self) -> Option<PathBuf> {
        if self.dataset.path.trim().is_empty() {
            return None;
        }
        Some(expand_tilde(&self.dataset.path))
    }

    pub fn default_template() -> String {
        let template = r#"[cabinet]
nom = "Mon Cabinet"

[dataset]
# JSON portfolio file; leave empty to use the built-in sample portfolio
path = ""

[analysis]
seuil_rentabilite = 90.0

[listing]
page_size = 10

[alerts]
enable_stdout = true

[alerts.rules]
diagnostic_degrade = true
retour_equilibre = true
diagnostic_change = true
plan_en_retard = true
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seuil_rentabilite: default_seuil_rentabilite(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            enable_stdout: default_enable_stdout(),
            rules: AlertRulesConfig::default(),
        }
    }
}

impl Default for AlertRulesConfig {
    fn default() -> Self {
        Self {
            diagnostic_degrade: true,
            retour_equilibre: true,
            diagnostic_change: true,
            plan_en_retard: true,
        }
    }
}

fn default_seuil_rentabilite() -> f64 {
    DEFAULT_SEUIL_RENTABILITE
}

fn default_page_size() -> usize {
    10
}

fn default_enable_stdout() -> bool {
    true
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{expand_tilde, Config, ConfigOverrides};

    #[test]
    fn template_parses_back_to_defaults() {
        let parsed: Config =
            toml::from_str(&Config::default_template()).expect("failed parsing template");
        assert_eq!(parsed.analysis.seuil_rentabilite, 90.0);
        assert_eq!(parsed.listing.page_size, 10);
        assert!(parsed.alerts.rules.plan_en_retard);
        assert!(parsed.resolved_dataset_path().is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Some(std::path::Path::new("/nonexistent/config.toml")))
            .expect("failed loading defaults");
        assert_eq!(config.listing.page_size, 10);
    }

    #[test]
    fn loads_partial_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed creating temp file");
        file.write_all(b"[analysis]\nseuil_rentabilite = 120.0\n")
            .expect("failed writing temp file");
        let config = Config::load(Some(file.path())).expect("failed loading config");
        assert_eq!(config.analysis.seuil_rentabilite, 120.0);
        // untouched sections fall back to defaults
        assert_eq!(config.listing.page_size, 10);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            dataset_path: Some("/tmp/portfolio.json".to_string()),
            seuil_rentabilite: Some(75.0),
            page_size: None,
        });
        assert_eq!(config.analysis.seuil_rentabilite, 75.0);
        assert_eq!(
            config.resolved_dataset_path(),
            Some(std::path::PathBuf::from("/tmp/portfolio.json"))
        );
    }

    #[test]
    fn tilde_expansion_leaves_absolute_paths_alone() {
        assert_eq!(
            expand_tilde("/var/data/p.json"),
            std::path::PathBuf::from("/var/data/p.json")
        );
    }
}
