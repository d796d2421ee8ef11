//! 演示服务

use std::sync::Arc;

use april_core::marker::{BeanInstance, CapabilitySpec, ComponentSpec, MarkerKind, TypeDescriptor};

/// 问候能力
pub trait GreetingService: Send + Sync {
    fn get_name(&self, user_name: &str) -> String;
}

/// 问候能力的唯一实现
#[derive(Default)]
pub struct DemoService;

impl GreetingService for DemoService {
    fn get_name(&self, user_name: &str) -> String {
        format!("My name is {}", user_name)
    }
}

fn construct_demo_service() -> anyhow::Result<BeanInstance> {
    Ok(Arc::new(DemoService))
}

fn bind_greeting_service(instance: &BeanInstance) -> Option<BeanInstance> {
    let concrete = instance.clone().downcast::<DemoService>().ok()?;
    let capability: Arc<dyn GreetingService> = concrete;
    Some(Arc::new(capability))
}

inventory::submit! {
    TypeDescriptor {
        type_name: concat!(module_path!(), "::DemoService"),
        component: Some(ComponentSpec {
            kind: MarkerKind::Service,
            name: "",
            base_path: "",
            construct: construct_demo_service,
            capabilities: &[CapabilitySpec {
                name: "GreetingService",
                bind: bind_greeting_service,
            }],
            slots: &[],
        }),
    }
}

// 能力 trait 本身也会被发现，但没有组件标记，注册阶段跳过
inventory::submit! {
    TypeDescriptor {
        type_name: concat!(module_path!(), "::GreetingService"),
        component: None,
    }
}
