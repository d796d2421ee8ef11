//! 组件元数据表
//!
//! Rust 没有运行时注解反射，声明式标记以类型化的元数据描述符表达，
//! 通过 inventory 在链接期收集。容器读取这张表，而不做任何运行时自省。

use std::any::Any;
use std::sync::Arc;

/// 容器托管的 Bean 实例类型
pub type BeanInstance = Arc<dyn Any + Send + Sync>;

/// 组件标记种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Controller,
    Service,
}

/// 能力（接口）绑定描述
///
/// `bind` 把具体类型的 `Arc` 重新包装为能力 trait 对象，
/// 使接口类型的注入槽可以按能力名解析到实现。
pub struct CapabilitySpec {
    /// 能力名称，即接口的简单名，如 "GreetingService"
    pub name: &'static str,

    /// 将具体实例包装为 `Arc<dyn Capability>` 后再装箱为 `BeanInstance`。
    /// 传入的实例类型不匹配时返回 None。
    pub bind: fn(&BeanInstance) -> Option<BeanInstance>,
}

/// 注入槽描述：声明该组件的一个待注入依赖字段
///
/// `assign` 是显式注入点（setter 约定）：容器不穿透可见性，
/// 由组件自己提供向下转型并填充 `Autowired` 槽的函数。
pub struct SlotSpec {
    /// 字段名，仅用于诊断
    pub field: &'static str,

    /// 声明类型名（能力名或 Bean 名），qualifier 为空时的解析键
    pub declared_type: &'static str,

    /// 显式指定的 Bean 名，空串表示未指定
    pub qualifier: &'static str,

    /// 把解析结果写入槽。dep 为 None 表示解析落空，槽保持未填充。
    pub assign: fn(owner: &BeanInstance, dep: Option<&BeanInstance>) -> anyhow::Result<()>,
}

/// 组件标记的完整载荷
pub struct ComponentSpec {
    /// 标记种类
    pub kind: MarkerKind,

    /// 显式 Bean 名（仅 Service 支持），空串表示按类型简单名推导
    pub name: &'static str,

    /// 类型级路径前缀（仅 Controller），与方法级路径拼接成路由键
    pub base_path: &'static str,

    /// 默认构造函数
    pub construct: fn() -> anyhow::Result<BeanInstance>,

    /// 该类型声明实现的能力列表
    pub capabilities: &'static [CapabilitySpec],

    /// 该类型声明的注入槽列表
    pub slots: &'static [SlotSpec],
}

/// 类型描述符 - 用于 inventory 收集
///
/// 每个向框架声明的类型一条。`component` 为 None 的类型会被发现，
/// 但注册阶段会跳过（发现范围刻意宽于可注册范围）。
pub struct TypeDescriptor {
    /// 全限定类型名，如 "web_demo::controller::DemoController"
    pub type_name: &'static str,

    /// 组件标记，None 表示无标记类型
    pub component: Option<ComponentSpec>,
}

inventory::collect!(TypeDescriptor);

impl TypeDescriptor {
    /// 返回组件标记，未标记类型返回 None
    pub fn component(&self) -> Option<&ComponentSpec> {
        self.component.as_ref()
    }
}
