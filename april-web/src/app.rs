//! 应用引导
//!
//! 启动被建模为带硬边界的有限阶段序列：
//! 加载配置 → 组件发现 → 注册 → 依赖注入 → 路由表构建。
//! 各阶段严格顺序执行且单线程；任一阶段失败即中止，
//! 不会把半成品状态暴露给派发。

use april_core::config::ApplicationConfig;
use april_core::discovery::ComponentScanner;
use april_core::injection::inject_all;
use april_core::logging::LoggingConfig;
use april_core::registry::BeanRegistry;

use crate::dispatch::Dispatcher;
use crate::error::BootError;
use crate::mapping::HandlerMapping;

/// April 应用程序
///
/// 提供便捷的启动方式，产出不可变的 [`Dispatcher`]。
pub struct AprilApplication {
    /// 应用名称
    name: String,

    /// 配置文件路径
    config_file: String,

    /// 直接给定的配置（优先于配置文件，便于测试）
    config: Option<ApplicationConfig>,

    /// 日志配置（不设置时从应用配置推导）
    logging: Option<LoggingConfig>,
}

impl AprilApplication {
    /// 创建新的应用
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_file: "application.toml".to_string(),
            config: None,
            logging: None,
        }
    }

    /// 设置配置文件路径
    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = path.into();
        self
    }

    /// 直接给定配置，跳过文件加载
    pub fn config(mut self, config: ApplicationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 设置日志配置
    pub fn logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// 运行启动序列，返回可并发派发的运行时
    pub fn run(self) -> Result<Dispatcher, BootError> {
        // 01. 加载配置文件
        let config = match self.config {
            Some(config) => config,
            None => ApplicationConfig::from_file(&self.config_file)?,
        };

        // 02. 初始化日志（显式配置优先于配置文件里的过滤器）
        let logging = self.logging.unwrap_or_else(|| {
            let mut logging = LoggingConfig::new();
            if let Some(filter) = &config.log_filter {
                logging = logging.filter(filter.clone());
            }
            logging
        });
        logging.init();

        tracing::info!("Starting {} application", self.name);

        // 03. 组件发现
        let names = ComponentScanner::new(&config.scan_root).scan()?;

        // 04. 初始化 IoC 容器
        let registry = BeanRegistry::from_scan(&names)?;

        // 05. 依赖注入（必须在全量注册之后，前向引用才可解析）
        inject_all(&registry, config.strict_injection)?;

        // 06. 初始化处理器映射（必须在注入之后，处理器 Bean 才是完整的）
        let mapping = HandlerMapping::build(&registry)?;

        tracing::info!(
            "{} finished init: {} bean(s), {} route(s)",
            self.name,
            registry.len(),
            mapping.len()
        );

        Ok(Dispatcher::new(registry, mapping))
    }
}
