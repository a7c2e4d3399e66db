use crate::adapters::export::ExportFormat;
use crate::adapters::scryfall::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::core::catalog::DEFAULT_EXCLUDED_SET_TYPES;
use crate::core::ConfigProvider;
use crate::utils::error::{SweepError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_excluded_set_types")]
    pub excluded_set_types: Vec<String>,
    #[serde(default)]
    pub include_digital: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            excluded_set_types: default_excluded_set_types(),
            include_digital: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub sets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub format: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_excluded_set_types() -> Vec<String> {
    DEFAULT_EXCLUDED_SET_TYPES.iter().map(|s| s.to_string()).collect()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SweepError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SweepError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCRYFALL_BASE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn export_format(&self) -> Result<Option<ExportFormat>> {
        match &self.output {
            Some(output) => {
                ExportFormat::parse(output.format.as_deref().unwrap_or("csv")).map(Some)
            }
            None => Ok(None),
        }
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_base_url(&self) -> &str {
        &self.catalog.base_url
    }

    fn user_agent(&self) -> &str {
        &self.catalog.user_agent
    }

    fn excluded_set_types(&self) -> &[String] {
        &self.catalog.excluded_set_types
    }

    fn include_digital(&self) -> bool {
        self.catalog.include_digital
    }

    fn selected_sets(&self) -> &[String] {
        &self.selection.sets
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("catalog.base_url", &self.catalog.base_url)?;
        validation::validate_non_empty_string("catalog.user_agent", &self.catalog.user_agent)?;
        for code in &self.selection.sets {
            validation::validate_set_code("selection.sets", code)?;
        }
        if let Some(output) = &self.output {
            validation::validate_path("output.path", &output.path)?;
            if let Some(format) = &output.format {
                validation::validate_one_of("output.format", format, &ExportFormat::VALID)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[catalog]
base_url = "https://catalog.example.com"
user_agent = "sweeper/2.0"
excluded_set_types = ["token"]
include_digital = true

[selection]
sets = ["mh3", "otj"]

[output]
path = "./cards.json"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_base_url(), "https://catalog.example.com");
        assert_eq!(config.user_agent(), "sweeper/2.0");
        assert_eq!(config.excluded_set_types(), ["token".to_string()]);
        assert!(config.include_digital());
        assert_eq!(config.selected_sets().len(), 2);
        assert_eq!(config.export_format().unwrap(), Some(ExportFormat::Json));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply_to_empty_config() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.catalog_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.excluded_set_types().len(), 3);
        assert!(!config.include_digital());
        assert!(config.selected_sets().is_empty());
        assert_eq!(config.export_format().unwrap(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CARD_SWEEP_TEST_BASE_URL", "https://mirror.example.com");

        let toml_content = r#"
[catalog]
base_url = "${CARD_SWEEP_TEST_BASE_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog.base_url, "https://mirror.example.com");

        std::env::remove_var("CARD_SWEEP_TEST_BASE_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[catalog]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[selection]
sets = ["mh3", "not a set"]
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[output]
path = "out.xml"
format = "xml"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[selection]\nsets = [\"lci\"]\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.selected_sets(), ["lci".to_string()]);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[catalog\nbase_url = 1").unwrap_err();
        assert!(matches!(err, SweepError::ConfigValidationError { .. }));
    }
}
