//! 启动配置
//!
//! 配置本身从外部协作者（一个 TOML 文件）加载，
//! 容器只认里面的键值：扫描根、注入模式、日志过滤器。

use std::path::Path;

use serde::Deserialize;

use crate::error::{StartupError, StartupResult};

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ApplicationConfig {
    /// 组件扫描根（模块路径）
    pub scan_root: String,

    /// 严格注入模式：解析落空直接启动失败（默认宽容）
    #[serde(default)]
    pub strict_injection: bool,

    /// 日志过滤器，如 "april_core=debug,info"
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl ApplicationConfig {
    /// 以扫描根构造最小配置
    pub fn new(scan_root: impl Into<String>) -> Self {
        Self {
            scan_root: scan_root.into(),
            strict_injection: false,
            log_filter: None,
        }
    }

    /// 从 TOML 文件加载配置
    pub fn from_file(path: impl AsRef<Path>) -> StartupResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StartupError::Configuration(format!(
                "cannot read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!("loaded configuration from '{}'", path.display());
        Self::from_toml_str(&raw)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(raw: &str) -> StartupResult<Self> {
        toml::from_str(raw)
            .map_err(|e| StartupError::Configuration(format!("malformed config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = ApplicationConfig::from_toml_str(
            r#"
            scan-root = "web_demo"
            strict-injection = true
            log-filter = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan_root, "web_demo");
        assert!(config.strict_injection);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_defaults_are_permissive() {
        let config = ApplicationConfig::from_toml_str(r#"scan-root = "demo""#).unwrap();
        assert!(!config.strict_injection);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_missing_scan_root_is_configuration_error() {
        let err = ApplicationConfig::from_toml_str("strict-injection = true").unwrap_err();
        assert!(matches!(err, StartupError::Configuration(_)));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = ApplicationConfig::from_file("/no/such/application.toml").unwrap_err();
        assert!(matches!(err, StartupError::Configuration(_)));
    }
}
