//! 请求期与装配期错误类型
//!
//! 启动期错误致命；请求期错误按调用隔离，绝不影响容器本身。

use april_core::StartupError;
use thiserror::Error;

/// 路由表构建错误（启动期，致命）
#[derive(Error, Debug)]
pub enum MappingError {
    /// 两个处理器归一化后映射到同一路由键。
    /// 既定策略：启动期拒绝，而不是后注册者静默覆盖。
    #[error("ambiguous route '{path}': both '{existing}' and '{incoming}' map to it")]
    AmbiguousRoute {
        path: String,
        existing: String,
        incoming: String,
    },
}

/// 请求期错误（可恢复，按调用隔离）
#[derive(Error, Debug)]
pub enum DispatchError {
    /// 路由未命中，映射到边界上的 "not found"
    #[error("no handler mapped for path '{path}'")]
    RouteNotFound { path: String },

    /// 具名请求值缺失或无法转换到声明类型
    #[error("cannot bind parameter '{name}': {reason}")]
    ParameterBinding { name: &'static str, reason: String },

    /// 处理器本体执行失败，携带原始原因
    #[error("handler for route '{route}' failed: {source}")]
    HandlerExecution {
        route: String,
        #[source]
        source: anyhow::Error,
    },
}

/// 应用启动错误聚合
#[derive(Error, Debug)]
pub enum BootError {
    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}
