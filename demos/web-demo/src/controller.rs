//! 演示控制器
//!
//! 基础路径 /demo 下四个处理器：query 经注入的问候服务写响应，
//! add/sub 做带类型转换的算术并直接写响应，remove 以返回值交给派发器代写。

use std::sync::Arc;

use anyhow::Context;
use april_core::injection::Autowired;
use april_core::marker::{BeanInstance, ComponentSpec, MarkerKind, SlotSpec, TypeDescriptor};
use april_web::handler::{HandlerCall, ParamSource, ParamType, ParameterSpec, RouteDescriptor};
use april_web::request::ResponseWriter;

use crate::service::GreetingService;

#[derive(Default)]
pub struct DemoController {
    greeting_service: Autowired<dyn GreetingService>,
}

impl DemoController {
    fn greeting_service(&self) -> anyhow::Result<&Arc<dyn GreetingService>> {
        self.greeting_service
            .get()
            .context("greetingService is not wired")
    }

    pub fn query(&self, user_name: &str, response: &mut dyn ResponseWriter) -> anyhow::Result<()> {
        let result = self.greeting_service()?.get_name(user_name);
        response.write_body(&result)
    }

    pub fn add(&self, a: i64, b: i64, response: &mut dyn ResponseWriter) -> anyhow::Result<()> {
        response.write_body(&format!("{}+{}={}", a, b, a + b))
    }

    pub fn sub(&self, a: f64, b: f64, response: &mut dyn ResponseWriter) -> anyhow::Result<()> {
        response.write_body(&format!("{}-{}={}", a, b, a - b))
    }

    pub fn remove(&self, id: i64) -> String {
        id.to_string()
    }
}

fn construct_demo_controller() -> anyhow::Result<BeanInstance> {
    Ok(Arc::new(DemoController::default()))
}

fn assign_greeting_service(owner: &BeanInstance, dep: Option<&BeanInstance>) -> anyhow::Result<()> {
    let controller = owner
        .downcast_ref::<DemoController>()
        .context("owner is not DemoController")?;
    if let Some(dep) = dep {
        let service = dep
            .downcast_ref::<Arc<dyn GreetingService>>()
            .context("dependency is not a GreetingService capability")?;
        controller.greeting_service.inject(Arc::clone(service));
    }
    Ok(())
}

inventory::submit! {
    TypeDescriptor {
        type_name: concat!(module_path!(), "::DemoController"),
        component: Some(ComponentSpec {
            kind: MarkerKind::Controller,
            name: "",
            base_path: "/demo",
            construct: construct_demo_controller,
            capabilities: &[],
            slots: &[SlotSpec {
                field: "greeting_service",
                declared_type: "GreetingService",
                qualifier: "",
                assign: assign_greeting_service,
            }],
        }),
    }
}

fn invoke_query(owner: &BeanInstance, call: HandlerCall<'_>) -> anyhow::Result<Option<String>> {
    let controller = owner
        .downcast_ref::<DemoController>()
        .context("owner is not DemoController")?;
    controller.query(call.text_arg(0)?, call.response)?;
    Ok(None)
}

fn invoke_add(owner: &BeanInstance, call: HandlerCall<'_>) -> anyhow::Result<Option<String>> {
    let controller = owner
        .downcast_ref::<DemoController>()
        .context("owner is not DemoController")?;
    controller.add(call.int_arg(0)?, call.int_arg(1)?, call.response)?;
    Ok(None)
}

fn invoke_sub(owner: &BeanInstance, call: HandlerCall<'_>) -> anyhow::Result<Option<String>> {
    let controller = owner
        .downcast_ref::<DemoController>()
        .context("owner is not DemoController")?;
    controller.sub(call.float_arg(0)?, call.float_arg(1)?, call.response)?;
    Ok(None)
}

fn invoke_remove(owner: &BeanInstance, call: HandlerCall<'_>) -> anyhow::Result<Option<String>> {
    let controller = owner
        .downcast_ref::<DemoController>()
        .context("owner is not DemoController")?;
    Ok(Some(controller.remove(call.int_arg(0)?)))
}

inventory::submit! {
    RouteDescriptor {
        controller: concat!(module_path!(), "::DemoController"),
        handler: "query",
        path: "/query",
        parameters: &[
            ParameterSpec {
                source: ParamSource::Param { name: "userName", ty: ParamType::Text },
                declared_type: "String",
            },
            ParameterSpec {
                source: ParamSource::Request,
                declared_type: "WebRequest",
            },
            ParameterSpec {
                source: ParamSource::Response,
                declared_type: "ResponseWriter",
            },
        ],
        invoke: invoke_query,
    }
}

inventory::submit! {
    RouteDescriptor {
        controller: concat!(module_path!(), "::DemoController"),
        handler: "add",
        path: "/add",
        parameters: &[
            ParameterSpec {
                source: ParamSource::Request,
                declared_type: "WebRequest",
            },
            ParameterSpec {
                source: ParamSource::Response,
                declared_type: "ResponseWriter",
            },
            ParameterSpec {
                source: ParamSource::Param { name: "a", ty: ParamType::Int },
                declared_type: "i64",
            },
            ParameterSpec {
                source: ParamSource::Param { name: "b", ty: ParamType::Int },
                declared_type: "i64",
            },
        ],
        invoke: invoke_add,
    }
}

inventory::submit! {
    RouteDescriptor {
        controller: concat!(module_path!(), "::DemoController"),
        handler: "sub",
        path: "/sub",
        parameters: &[
            ParameterSpec {
                source: ParamSource::Request,
                declared_type: "WebRequest",
            },
            ParameterSpec {
                source: ParamSource::Response,
                declared_type: "ResponseWriter",
            },
            ParameterSpec {
                source: ParamSource::Param { name: "a", ty: ParamType::Float },
                declared_type: "f64",
            },
            ParameterSpec {
                source: ParamSource::Param { name: "b", ty: ParamType::Float },
                declared_type: "f64",
            },
        ],
        invoke: invoke_sub,
    }
}

inventory::submit! {
    RouteDescriptor {
        controller: concat!(module_path!(), "::DemoController"),
        handler: "remove",
        path: "/remove",
        parameters: &[ParameterSpec {
            source: ParamSource::Param { name: "id", ty: ParamType::Int },
            declared_type: "i64",
        }],
        invoke: invoke_remove,
    }
}
