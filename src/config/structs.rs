use serde::{Deserialize, Serialize};

use crate::errors::{Result, UrlgptError};
use crate::storage::STORAGE_KEY;
use crate::utils::MAX_ALIAS_LENGTH;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 服务器地址、端口、CPU 数量
/// - storage: 存储槽后端
/// - links: 短码与过期策略
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：URLGPT，分隔符：__
    /// 示例：URLGPT__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let explicit = path.is_some();
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            // 显式指定的配置文件必须存在
            .add_source(File::with_name(path).required(explicit))
            .add_source(
                Environment::with_prefix("URLGPT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;

        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.links.code_length == 0 {
            return Err(UrlgptError::config("links.code_length must be at least 1"));
        }
        if self.links.code_length > MAX_ALIAS_LENGTH {
            return Err(UrlgptError::config(format!(
                "links.code_length must be at most {}",
                MAX_ALIAS_LENGTH
            )));
        }
        if self.links.expiry_months == 0 {
            return Err(UrlgptError::config(
                "links.expiry_months must be at least 1",
            ));
        }
        if self.links.max_generate_attempts == 0 {
            return Err(UrlgptError::config(
                "links.max_generate_attempts must be at least 1",
            ));
        }
        if !matches!(self.storage.backend.as_str(), "file" | "memory") {
            return Err(UrlgptError::config(format!(
                "Unknown storage backend '{}'. Valid: file, memory",
                self.storage.backend
            )));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(UrlgptError::config(format!(
                "Unknown log format '{}'. Valid: text, json",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| UrlgptError::config(format!("Failed to render config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| UrlgptError::config(format!("Failed to create directory: {}", e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| UrlgptError::config(format!("Failed to write config: {}", e)))?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// `GET /` 的跳转目标，为空时返回 404
    #[serde(default)]
    pub default_url: String,
}

/// 存储槽配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_storage_path")]
    pub path: String,
}

/// 短码与过期策略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    #[serde(default = "default_expiry_months")]
    pub expiry_months: u32,
    #[serde(default = "default_max_generate_attempts")]
    pub max_generate_attempts: u32,
    /// 不能作为短码使用的路由名
    #[serde(default = "default_reserved_routes")]
    pub reserved_routes: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_storage_backend() -> String {
    "file".to_string()
}

fn default_storage_path() -> String {
    format!("{}.json", STORAGE_KEY)
}

fn default_code_length() -> usize {
    6
}

fn default_expiry_months() -> u32 {
    crate::utils::expiry::DEFAULT_EXPIRY_MONTHS
}

fn default_max_generate_attempts() -> u32 {
    16
}

fn default_reserved_routes() -> Vec<String> {
    vec!["api".to_string(), "health".to_string(), "widget".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            default_url: String::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: default_storage_path(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            expiry_months: default_expiry_months(),
            max_generate_attempts: default_max_generate_attempts(),
            reserved_routes: default_reserved_routes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
