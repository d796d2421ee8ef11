//! 启动期错误类型
//!
//! 启动期错误一律致命：半注册的容器不是可恢复状态，初始化立即中止。
//! 请求期错误在 april-web 中单独建模。

use thiserror::Error;

/// 启动期统一 Result 别名
pub type StartupResult<T> = std::result::Result<T, StartupError>;

/// 启动期错误
#[derive(Error, Debug)]
pub enum StartupError {
    /// 配置错误：扫描根无法解析、配置缺失或格式非法
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 被标记类型无法实例化
    #[error("failed to construct bean of type '{type_name}': {source}")]
    BeanConstruction {
        type_name: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Bean 名称冲突
    #[error("duplicate bean name '{name}': already registered by '{existing}', rejected '{incoming}'")]
    DuplicateBean {
        name: String,
        existing: &'static str,
        incoming: &'static str,
    },

    /// 能力绑定冲突：一个能力至多绑定一个实现
    #[error("capability '{capability}' already bound to '{existing}', cannot bind '{incoming}'")]
    DuplicateCapability {
        capability: &'static str,
        existing: String,
        incoming: &'static str,
    },

    /// 严格模式下注入目标不存在
    #[error("unresolved dependency: bean '{bean}' slot '{slot}' resolves nothing for '{target}'")]
    UnresolvedDependency {
        bean: String,
        slot: &'static str,
        target: String,
    },

    /// 注入点执行失败（向下转型不匹配等）
    #[error("injection failed for bean '{bean}' slot '{slot}': {source}")]
    Injection {
        bean: String,
        slot: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
