use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::backend::database::DatabaseBackendConfig;

/// Categories written to an empty database on first start
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

pub const DEFAULT_QUESTIONS_PER_PAGE: i64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    #[serde(rename = "type")]
    pub backend_type: String,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub db_type: String,
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeedConfig {
    #[serde(default = "default_seed_categories")]
    pub categories: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            categories: default_seed_categories(),
        }
    }
}

fn default_seed_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaginationConfig {
    #[serde(default = "default_questions_per_page")]
    pub questions_per_page: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            questions_per_page: DEFAULT_QUESTIONS_PER_PAGE,
        }
    }
}

fn default_questions_per_page() -> i64 {
    DEFAULT_QUESTIONS_PER_PAGE
}

impl AppConfig {
    /// Load configuration from a YAML file, expanding `${VAR}` references
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, String> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        Self::from_yaml(&content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let expanded_content = Self::expand_env_vars(content)?;

        let app_config: AppConfig =
            serde_yaml::from_str(&expanded_content).map_err(|e| e.to_string())?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Zero-config mode: in-memory SQLite on localhost
    pub fn default_config() -> Self {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            backend: BackendConfig {
                backend_type: "database".to_string(),
                database: Some(DatabaseConfig {
                    db_type: "sqlite".to_string(),
                    url: ":memory:".to_string(),
                    max_connections: 1,
                }),
            },
            seed: SeedConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.backend.backend_type != "database" {
            return Err(format!(
                "Unsupported backend type: {}",
                self.backend.backend_type
            ));
        }

        if self.backend.database.is_none() {
            return Err("Database configuration is required".to_string());
        }

        if self.pagination.questions_per_page < 1 {
            return Err("questions_per_page must be at least 1".to_string());
        }

        Ok(())
    }

    /// Build the backend connection settings from the `backend.database` section
    pub fn to_backend_config(&self) -> Result<DatabaseBackendConfig, String> {
        let database = self
            .backend
            .database
            .as_ref()
            .ok_or_else(|| "Database configuration is required".to_string())?;

        let config = match database.db_type.as_str() {
            "sqlite" => DatabaseBackendConfig::sqlite(database.url.clone()),
            "postgresql" | "postgres" => DatabaseBackendConfig::postgres(database.url.clone()),
            other => return Err(format!("Unsupported database type: {}", other)),
        };

        Ok(config.with_max_connections(database.max_connections))
    }

    fn expand_env_vars(content: &str) -> Result<String, String> {
        let mut expanded = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("${") {
            expanded.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find('}') else {
                // Unterminated reference, keep the remaining text as is
                expanded.push_str(&rest[start..]);
                return Ok(expanded);
            };

            let var_expr = &after[..end];
            let (var_name, default_value) = match var_expr.find(":-") {
                Some(pos) => (&var_expr[..pos], Some(&var_expr[pos + 2..])),
                None => (var_expr, None),
            };

            let value = match (std::env::var(var_name), default_value) {
                (Ok(val), _) => val,
                (Err(_), Some(default)) => default.to_string(),
                (Err(_), None) => {
                    return Err(format!(
                        "Environment variable {} not found and no default provided",
                        var_name
                    ))
                }
            };

            expanded.push_str(&value);
            rest = &after[end + 1..];
        }

        expanded.push_str(rest);
        Ok(expanded)
    }
}
