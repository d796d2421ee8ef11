// april-core: 类似 Spring 的微型依赖注入容器
//
// 提供基于编译期元数据表的组件管理，支持：
// - 命名空间扫描（组件发现）
// - 单例 Bean 的饿汉式构造与注册
// - 能力（接口）绑定：一个能力至多一个实现
// - 两阶段启动：先全量注册，再统一注入，天然容忍循环依赖

pub mod config;
pub mod discovery;
pub mod error;
pub mod injection;
pub mod logging;
pub mod marker;
pub mod registry;
pub mod utils;

// 重新导出常用类型
pub use config::ApplicationConfig;
pub use discovery::ComponentScanner;
pub use error::{StartupError, StartupResult};
pub use injection::{inject_all, Autowired};
pub use logging::{LogLevel, LoggingConfig};
pub use marker::{
    BeanInstance, CapabilitySpec, ComponentSpec, MarkerKind, SlotSpec, TypeDescriptor,
};
pub use registry::{BeanDefinition, BeanHandle, BeanRegistry};

// 导出 inventory，供下游注册元数据使用
pub use inventory;

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::config::ApplicationConfig;
    pub use crate::discovery::ComponentScanner;
    pub use crate::error::{StartupError, StartupResult};
    pub use crate::injection::{inject_all, Autowired};
    pub use crate::logging::{LogLevel, LoggingConfig};
    pub use crate::marker::{
        BeanInstance, CapabilitySpec, ComponentSpec, MarkerKind, SlotSpec, TypeDescriptor,
    };
    pub use crate::registry::{BeanDefinition, BeanHandle, BeanRegistry};
    // Re-export anyhow for convenience
    pub use anyhow::{anyhow, Context};
}
