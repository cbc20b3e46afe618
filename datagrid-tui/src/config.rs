//! Configuration loading for the DATAGRID TUI.
//!
//! Top-level fields are required; there are no defaults. Column entries only
//! default the flags a column usually leaves off.

use datagrid_core::{
    format_currency_usd, validate_descriptors, Alignment, CellValue, ColumnDescriptor,
    ColumnType, FilterConfig, Language, OptionItem, TableOptions,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    /// `en` or `pt`.
    pub language: String,
    pub tick_rate_ms: u64,
    /// JSON array of row objects keyed by column id.
    pub data_path: PathBuf,
    pub export_dir: PathBuf,
    pub export_base_name: String,
    /// Column order files live here, one per table name.
    pub state_dir: PathBuf,
    pub log_path: PathBuf,
    pub theme: ThemeConfig,
    pub table: TableConfig,
    pub columns: Vec<ColumnConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub page_size: usize,
    pub enable_row_selection: bool,
    pub enable_row_actions: bool,
    pub enable_pagination: bool,
    pub pagination_display_top: bool,
    pub persist_column_order: bool,
    pub table_name: Option<String>,
}

/// One `[[columns]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default = "default_hideable")]
    pub hideable: bool,
    pub align: Option<Alignment>,
    #[serde(default)]
    pub options: Vec<OptionItem>,
    pub filters: Option<FilterConfig>,
    #[serde(default)]
    pub formatter: FormatterName,
}

fn default_hideable() -> bool {
    true
}

/// Named cell formatters available to config-declared columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterName {
    #[default]
    Plain,
    /// `$1,234.57`, also used for number filter chips.
    CurrencyUsd,
}

impl ColumnConfig {
    pub fn to_descriptor(&self) -> ColumnDescriptor {
        let mut descriptor = ColumnDescriptor::new(&self.id, &self.title, self.column_type)
            .sortable(self.sortable)
            .hideable(self.hideable)
            .options(self.options.iter().cloned());
        if let Some(subtitle) = &self.subtitle {
            descriptor = descriptor.subtitle(subtitle);
        }
        if let Some(align) = self.align {
            descriptor = descriptor.aligned(align);
        }
        if let Some(filters) = self.filters {
            descriptor = descriptor.filters(filters);
        }
        match self.formatter {
            FormatterName::Plain => descriptor,
            FormatterName::CurrencyUsd => descriptor
                .formatter(|value: &CellValue| match value.as_number() {
                    Some(n) => format_currency_usd(n),
                    None => value.display(),
                })
                .filter_value_formatter(format_currency_usd),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or DATAGRID_TUI_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error(transparent)]
    Table(#[from] datagrid_core::ConfigError),
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&contents)?;
        config.resolve_relative_to(path.parent().unwrap_or(Path::new("")));
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Relative paths in a config file are relative to the file itself.
    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.data_path,
            &mut self.export_dir,
            &mut self.state_dir,
            &mut self.log_path,
        ] {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        for (field, path) in [
            ("data_path", &self.data_path),
            ("export_dir", &self.export_dir),
            ("state_dir", &self.state_dir),
            ("log_path", &self.log_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if self.export_base_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export_base_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.theme.name.eq_ignore_ascii_case("synthbrute") {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'synthbrute' is supported".to_string(),
            });
        }
        if self.columns.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "columns",
                reason: "at least one column is required".to_string(),
            });
        }
        self.table_options()?.validate()?;
        validate_descriptors(&self.descriptors())?;
        Ok(())
    }

    pub fn language(&self) -> Result<Language, ConfigError> {
        Ok(Language::from_str(&self.language)?)
    }

    pub fn table_options(&self) -> Result<TableOptions, ConfigError> {
        Ok(TableOptions {
            language: self.language()?,
            page_size: self.table.page_size,
            enable_row_selection: self.table.enable_row_selection,
            enable_row_actions: self.table.enable_row_actions,
            enable_pagination: self.table.enable_pagination,
            pagination_display_top: self.table.pagination_display_top,
            persist_column_order: self.table.persist_column_order,
            table_name: self.table.table_name.clone(),
        })
    }

    pub fn descriptors(&self) -> Vec<ColumnDescriptor> {
        self.columns.iter().map(ColumnConfig::to_descriptor).collect()
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("DATAGRID_TUI_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
language = "pt"
tick_rate_ms = 50
data_path = "usage.json"
export_dir = "exports"
export_base_name = "usage"
state_dir = "state"
log_path = "datagrid-tui.log"

[theme]
name = "synthbrute"

[table]
page_size = 5
enable_row_selection = true
enable_row_actions = true
enable_pagination = true
pagination_display_top = false
persist_column_order = true
table_name = "usage-overview"

[[columns]]
id = "owner"
title = "Owner"
sortable = true
hideable = false
filters = { text = true }

[[columns]]
id = "costs"
title = "Costs"
type = "number"
formatter = "currency_usd"
filters = { number = true }
"#;

    #[test]
    fn test_sample_parses_and_validates() {
        let config = TuiConfig::from_toml(SAMPLE).unwrap();
        config.validate().unwrap();
        assert_eq!(config.language().unwrap(), Language::Pt);

        let descriptors = config.descriptors();
        assert_eq!(descriptors.len(), 2);
        assert!(!descriptors[0].hideable);
        assert_eq!(descriptors[1].column_type, ColumnType::Number);
        assert!(descriptors[1].filter_value_formatter.is_some());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let contents = format!("{SAMPLE}\nextra = 1\n");
        assert!(matches!(
            TuiConfig::from_toml(&contents),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_language_rejected() {
        let mut config = TuiConfig::from_toml(SAMPLE).unwrap();
        config.language = "de".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Table(datagrid_core::ConfigError::UnknownLanguage { .. }))
        ));
    }

    #[test]
    fn test_relative_paths_follow_config_file() {
        let mut config = TuiConfig::from_toml(SAMPLE).unwrap();
        config.resolve_relative_to(Path::new("/etc/datagrid"));
        assert_eq!(config.data_path, PathBuf::from("/etc/datagrid/usage.json"));
        assert_eq!(config.state_dir, PathBuf::from("/etc/datagrid/state"));
    }
}
