//! 处理器元数据
//!
//! 方法级路由映射的类型化表达：每个处理器一条路由描述符，
//! 携带有序的参数描述与一个调用适配函数，通过 inventory 在链接期收集。

use april_core::marker::BeanInstance;

use crate::request::{ResponseWriter, WebRequest};

/// 具名请求值的目标类型，用于文本到参数的类型转换
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// 整数（i64）
    Int,
    /// 浮点数（f64）
    Float,
    /// 文本
    Text,
}

/// 参数来源
#[derive(Debug, Clone, Copy)]
pub enum ParamSource {
    /// 具名请求值，按名从请求中取出并做类型转换
    Param { name: &'static str, ty: ParamType },
    /// 框架提供的请求上下文对象
    Request,
    /// 框架提供的响应上下文对象
    Response,
}

/// 参数描述符
///
/// 位置即其在描述符切片中的下标。
pub struct ParameterSpec {
    /// 参数来源
    pub source: ParamSource,

    /// 声明类型名，仅用于诊断
    pub declared_type: &'static str,
}

/// 绑定完成的参数值
#[derive(Debug, Clone)]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// 一次处理器调用的现场
///
/// `args` 只含具名请求值（按声明顺序），上下文对象经由
/// `request` / `response` 原样传入。
pub struct HandlerCall<'a> {
    pub request: &'a WebRequest,
    pub response: &'a mut dyn ResponseWriter,
    pub args: &'a [ArgValue],
}

impl<'a> HandlerCall<'a> {
    /// 取第 idx 个已绑定参数为整数
    pub fn int_arg(&self, idx: usize) -> anyhow::Result<i64> {
        match self.args.get(idx) {
            Some(ArgValue::Int(value)) => Ok(*value),
            other => Err(anyhow::anyhow!("argument {} is not an integer: {:?}", idx, other)),
        }
    }

    /// 取第 idx 个已绑定参数为浮点数
    pub fn float_arg(&self, idx: usize) -> anyhow::Result<f64> {
        match self.args.get(idx) {
            Some(ArgValue::Float(value)) => Ok(*value),
            other => Err(anyhow::anyhow!("argument {} is not a float: {:?}", idx, other)),
        }
    }

    /// 取第 idx 个已绑定参数为文本
    ///
    /// 返回值只借用参数切片，不冻结整个调用现场，
    /// 处理器取到文本后仍可立即使用 `response`。
    pub fn text_arg(&self, idx: usize) -> anyhow::Result<&'a str> {
        match self.args.get(idx) {
            Some(ArgValue::Text(value)) => Ok(value.as_str()),
            other => Err(anyhow::anyhow!("argument {} is not text: {:?}", idx, other)),
        }
    }
}

/// 调用适配函数
///
/// 把所属 Bean 向下转型为具体控制器并调用处理方法。
/// 返回 `Some(body)` 表示由派发器代写响应体，`None` 表示
/// 处理器已直接写响应协作者。
pub type HandlerFn = fn(owner: &BeanInstance, call: HandlerCall<'_>) -> anyhow::Result<Option<String>>;

/// 路由描述符 - 用于 inventory 收集
pub struct RouteDescriptor {
    /// 所属控制器的全限定类型名
    pub controller: &'static str,

    /// 处理方法名，仅用于诊断与路由日志
    pub handler: &'static str,

    /// 方法级路径
    pub path: &'static str,

    /// 有序参数描述
    pub parameters: &'static [ParameterSpec],

    /// 调用适配函数
    pub invoke: HandlerFn,
}

inventory::collect!(RouteDescriptor);
