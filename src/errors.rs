use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlgptError {
    InvalidUrl(String),
    AliasConflict(String),
    InvalidAlias(String),
    CodeSpaceExhausted(String),
    StorageWrite(String),
    Serialization(String),
    Config(String),
}

impl UrlgptError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            UrlgptError::InvalidUrl(_) => "E001",
            UrlgptError::AliasConflict(_) => "E002",
            UrlgptError::InvalidAlias(_) => "E003",
            UrlgptError::CodeSpaceExhausted(_) => "E004",
            UrlgptError::StorageWrite(_) => "E005",
            UrlgptError::Serialization(_) => "E006",
            UrlgptError::Config(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            UrlgptError::InvalidUrl(_) => "Invalid URL",
            UrlgptError::AliasConflict(_) => "Alias Conflict",
            UrlgptError::InvalidAlias(_) => "Invalid Alias",
            UrlgptError::CodeSpaceExhausted(_) => "Code Space Exhausted",
            UrlgptError::StorageWrite(_) => "Storage Write Error",
            UrlgptError::Serialization(_) => "Serialization Error",
            UrlgptError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            UrlgptError::InvalidUrl(msg)
            | UrlgptError::AliasConflict(msg)
            | UrlgptError::InvalidAlias(msg)
            | UrlgptError::CodeSpaceExhausted(msg)
            | UrlgptError::StorageWrite(msg)
            | UrlgptError::Serialization(msg)
            | UrlgptError::Config(msg) => msg,
        }
    }

    /// Whether the error was caused by the caller's input rather than the
    /// storage layer.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UrlgptError::InvalidUrl(_)
                | UrlgptError::AliasConflict(_)
                | UrlgptError::InvalidAlias(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for UrlgptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UrlgptError {}

// 便捷的构造函数
impl UrlgptError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        UrlgptError::InvalidUrl(msg.into())
    }

    pub fn alias_conflict<T: Into<String>>(msg: T) -> Self {
        UrlgptError::AliasConflict(msg.into())
    }

    pub fn invalid_alias<T: Into<String>>(msg: T) -> Self {
        UrlgptError::InvalidAlias(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        UrlgptError::CodeSpaceExhausted(msg.into())
    }

    pub fn storage_write<T: Into<String>>(msg: T) -> Self {
        UrlgptError::StorageWrite(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        UrlgptError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        UrlgptError::Config(msg.into())
    }
}

impl From<std::io::Error> for UrlgptError {
    fn from(err: std::io::Error) -> Self {
        UrlgptError::StorageWrite(err.to_string())
    }
}

impl From<serde_json::Error> for UrlgptError {
    fn from(err: serde_json::Error) -> Self {
        UrlgptError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for UrlgptError {
    fn from(err: url::ParseError) -> Self {
        UrlgptError::InvalidUrl(err.to_string())
    }
}

impl From<config::ConfigError> for UrlgptError {
    fn from(err: config::ConfigError) -> Self {
        UrlgptError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UrlgptError>;
