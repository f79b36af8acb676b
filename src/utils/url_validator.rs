//! URL 验证模块
//!
//! Destinations must be absolute URLs. Schemes that execute or embed content
//! in the browser are refused since every stored URL ends up in a
//! `Location` header.

use url::Url;

/// URL 验证错误
#[derive(Debug)]
pub enum UrlValidationError {
    EmptyUrl,
    DangerousProtocol(String),
    MissingHost,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::MissingHost => write!(f, "URL must include a host"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &["javascript", "data", "file", "vbscript", "about", "blob"];

/// 验证 URL
///
/// 1. URL 不为空
/// 2. 可以被解析为绝对 URL（相对路径会失败）
/// 3. 不是危险协议
/// 4. http/https 必须带主机名
pub fn validate_url(url: &str) -> Result<Url, UrlValidationError> {
    if url.trim().is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if DANGEROUS_PROTOCOLS.contains(&parsed.scheme()) {
        return Err(UrlValidationError::DangerousProtocol(format!(
            "{}:",
            parsed.scheme()
        )));
    }

    if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_none_or(str::is_empty)
    {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(parsed)
}
