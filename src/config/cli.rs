use crate::adapters::scryfall::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::config::toml_config::TomlConfig;
use crate::core::catalog::DEFAULT_EXCLUDED_SET_TYPES;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "card-sweep")]
#[command(about = "Collects priced cards of the selected sets, most expensive first")]
pub struct CliConfig {
    /// TOML configuration file; command line flags override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Set codes to sweep, comma separated (e.g. mh3,otj)
    #[arg(short, long, value_delimiter = ',')]
    pub sets: Vec<String>,

    /// Write the settled cards to this file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format for --output (csv or json)
    #[arg(long)]
    pub format: Option<String>,

    /// List selectable sets instead of sweeping
    #[arg(long)]
    pub list_sets: bool,

    /// Include digital-only sets in --list-sets
    #[arg(long)]
    pub include_digital: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Log process memory and elapsed time per phase")]
    pub monitor: bool,

    #[arg(skip = DEFAULT_EXCLUDED_SET_TYPES.iter().map(|s| s.to_string()).collect::<Vec<_>>())]
    pub excluded_set_types: Vec<String>,
}

impl CliConfig {
    /// 套用 TOML 檔案，命令列參數優先
    pub fn merge_file(mut self, file: TomlConfig) -> Self {
        if self.base_url == DEFAULT_BASE_URL {
            self.base_url = file.catalog.base_url;
        }
        if self.user_agent == DEFAULT_USER_AGENT {
            self.user_agent = file.catalog.user_agent;
        }
        if self.sets.is_empty() {
            self.sets = file.selection.sets;
        }
        if !self.include_digital {
            self.include_digital = file.catalog.include_digital;
        }
        self.excluded_set_types = file.catalog.excluded_set_types;
        if let Some(output) = file.output {
            if self.output.is_none() {
                self.output = Some(output.path);
            }
            if self.format.is_none() {
                self.format = output.format;
            }
        }
        self
    }

    /// Loads `--config` when given and merges it under the flags.
    pub fn resolve(self) -> Result<Self> {
        match self.config.clone() {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(&path)?;
                Ok(self.merge_file(file))
            }
            None => Ok(self),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn catalog_base_url(&self) -> &str {
        &self.base_url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn excluded_set_types(&self) -> &[String] {
        &self.excluded_set_types
    }

    fn include_digital(&self) -> bool {
        self.include_digital
    }

    fn selected_sets(&self) -> &[String] {
        &self.sets
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("--base-url", &self.base_url)?;
        validation::validate_non_empty_string("--user-agent", &self.user_agent)?;
        for code in &self.sets {
            validation::validate_set_code("--sets", code)?;
        }
        if let Some(path) = &self.output {
            validation::validate_path("--output", path)?;
        }
        if let Some(format) = &self.format {
            validation::validate_one_of("--format", format, &crate::adapters::export::ExportFormat::VALID)?;
        }
        if self.sets.is_empty() && !self.list_sets {
            return Err(crate::utils::error::SweepError::MissingConfigError {
                field: "sets".to_string(),
            });
        }
        Ok(())
    }
}
