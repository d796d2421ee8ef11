//! 请求派发
//!
//! 对每次入站调用：归一化路径 → 查路由 → 按参数描述逐位绑定 →
//! 对所属 Bean 调用处理器 → 转发返回值。处理器的失败（错误或 panic）
//! 在此边界被捕获并包装，绝不波及容器的长期状态。

use std::panic::{catch_unwind, AssertUnwindSafe};

use april_core::registry::BeanRegistry;

use crate::error::DispatchError;
use crate::handler::{ArgValue, HandlerCall, ParamSource, ParamType, RouteDescriptor};
use crate::mapping::{normalize_path, HandlerMapping};
use crate::request::{ResponseWriter, WebRequest};

/// 请求派发器
///
/// 持有启动完成后的注册表与路由表，二者均不可变，
/// 派发可被多个请求线程无锁并发调用。
#[derive(Debug)]
pub struct Dispatcher {
    registry: BeanRegistry,
    mapping: HandlerMapping,
}

impl Dispatcher {
    pub fn new(registry: BeanRegistry, mapping: HandlerMapping) -> Self {
        Self { registry, mapping }
    }

    /// 容器注册表
    pub fn registry(&self) -> &BeanRegistry {
        &self.registry
    }

    /// 路由表
    pub fn mapping(&self) -> &HandlerMapping {
        &self.mapping
    }

    /// 派发一次入站请求
    pub fn dispatch(
        &self,
        request: &WebRequest,
        response: &mut dyn ResponseWriter,
    ) -> Result<(), DispatchError> {
        let path = normalize_path(request.path());

        let Some(entry) = self.mapping.lookup(&path) else {
            tracing::debug!("no handler mapped for '{}'", path);
            return Err(DispatchError::RouteNotFound { path });
        };

        let Some(owner) = self.registry.get(&entry.bean_name) else {
            // 路由表由注册表构建，所属 Bean 必然存在
            return Err(DispatchError::HandlerExecution {
                route: path,
                source: anyhow::anyhow!("owner bean '{}' missing from registry", entry.bean_name),
            });
        };

        let args = bind_arguments(entry.descriptor, request)?;

        tracing::debug!(
            "dispatching '{}' to {}::{} with {} bound argument(s)",
            path,
            entry.bean_name,
            entry.handler,
            args.len()
        );

        let call = HandlerCall {
            request,
            response: &mut *response,
            args: &args,
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| (entry.descriptor.invoke)(&owner.instance, call)));

        let body = match outcome {
            Err(panic) => {
                // 解引用 Box 取载荷本体，否则向下转型落在 Box 上而不命中
                return Err(DispatchError::HandlerExecution {
                    route: path,
                    source: anyhow::anyhow!("handler panicked: {}", panic_message(&*panic)),
                });
            }
            Ok(Err(source)) => {
                return Err(DispatchError::HandlerExecution { route: path, source });
            }
            Ok(Ok(body)) => body,
        };

        // 处理器声明了返回值时由派发器代写响应体
        if let Some(body) = body {
            response
                .write_body(&body)
                .map_err(|source| DispatchError::HandlerExecution { route: path, source })?;
        }

        Ok(())
    }
}

/// 按参数描述从请求数据构造调用实参
///
/// 只绑定具名请求值；上下文参数在调用现场原样传入。
fn bind_arguments(
    descriptor: &RouteDescriptor,
    request: &WebRequest,
) -> Result<Vec<ArgValue>, DispatchError> {
    let mut args = Vec::new();

    for parameter in descriptor.parameters {
        match parameter.source {
            ParamSource::Param { name, ty } => {
                let raw = request
                    .param(name)
                    .ok_or_else(|| DispatchError::ParameterBinding {
                        name,
                        reason: "missing request value".to_string(),
                    })?;
                args.push(coerce(raw, ty, name)?);
            }
            ParamSource::Request | ParamSource::Response => {}
        }
    }

    Ok(args)
}

/// 文本到声明类型的转换
fn coerce(raw: &str, ty: ParamType, name: &'static str) -> Result<ArgValue, DispatchError> {
    match ty {
        ParamType::Text => Ok(ArgValue::Text(raw.to_string())),
        ParamType::Int => raw
            .trim()
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| DispatchError::ParameterBinding {
                name,
                reason: format!("'{}' is not an integer", raw),
            }),
        ParamType::Float => raw
            .trim()
            .parse::<f64>()
            .map(ArgValue::Float)
            .map_err(|_| DispatchError::ParameterBinding {
                name,
                reason: format!("'{}' is not a number", raw),
            }),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ParameterSpec;

    fn noop_handler(
        _owner: &april_core::marker::BeanInstance,
        _call: HandlerCall<'_>,
    ) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    static COERCION_ROUTE: RouteDescriptor = RouteDescriptor {
        controller: "fixtures::dispatch::NoController",
        handler: "noop",
        path: "/noop",
        parameters: &[
            ParameterSpec {
                source: ParamSource::Param {
                    name: "a",
                    ty: ParamType::Int,
                },
                declared_type: "i64",
            },
            ParameterSpec {
                source: ParamSource::Request,
                declared_type: "WebRequest",
            },
            ParameterSpec {
                source: ParamSource::Param {
                    name: "b",
                    ty: ParamType::Float,
                },
                declared_type: "f64",
            },
        ],
        invoke: noop_handler,
    };

    #[test]
    fn test_bind_arguments_skips_context_positions() {
        let request = WebRequest::parse("/noop?a=2&b=3.5");
        let args = bind_arguments(&COERCION_ROUTE, &request).unwrap();
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0], ArgValue::Int(2)));
        assert!(matches!(args[1], ArgValue::Float(f) if (f - 3.5).abs() < f64::EPSILON));
    }

    #[test]
    fn test_bind_missing_value_is_binding_error() {
        let request = WebRequest::parse("/noop?a=2");
        let err = bind_arguments(&COERCION_ROUTE, &request).unwrap_err();
        assert!(matches!(err, DispatchError::ParameterBinding { name: "b", .. }));
    }

    #[test]
    fn test_panic_message_extracts_str_and_string_payloads() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), "boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new("kaboom".to_string());
        assert_eq!(panic_message(&*payload), "kaboom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(&*payload), "non-string panic payload");
    }

    #[test]
    fn test_coerce_rejects_non_numeric_text() {
        assert!(matches!(
            coerce("xyz", ParamType::Int, "a"),
            Err(DispatchError::ParameterBinding { name: "a", .. })
        ));
        assert!(matches!(coerce(" 7 ", ParamType::Int, "a"), Ok(ArgValue::Int(7))));
        assert!(matches!(
            coerce("anything", ParamType::Text, "s"),
            Ok(ArgValue::Text(_))
        ));
    }
}
