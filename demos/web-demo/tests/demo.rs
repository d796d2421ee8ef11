//! 演示应用的端到端测试
//!
//! 走完整启动序列（扫描 → 注册 → 注入 → 路由表），再做进程内派发。

use std::sync::Arc;

use april_core::config::ApplicationConfig;
use april_core::error::StartupError;
use april_web::app::AprilApplication;
use april_web::dispatch::Dispatcher;
use april_web::error::{BootError, DispatchError};
use april_web::request::{BufferedResponse, WebRequest};

use web_demo::service::{DemoService, GreetingService};

fn boot() -> Dispatcher {
    AprilApplication::new("web-demo-test")
        .config(ApplicationConfig::new("web_demo"))
        .run()
        .unwrap()
}

fn body_of(dispatcher: &Dispatcher, target: &str) -> Result<String, DispatchError> {
    let request = WebRequest::parse(target);
    let mut response = BufferedResponse::new();
    dispatcher.dispatch(&request, &mut response)?;
    Ok(response.body().to_string())
}

#[test]
fn query_greets_through_injected_service() {
    let dispatcher = boot();
    assert_eq!(
        body_of(&dispatcher, "/demo/query?userName=Alice").unwrap(),
        "My name is Alice"
    );
}

#[test]
fn add_coerces_integer_parameters() {
    let dispatcher = boot();
    assert_eq!(body_of(&dispatcher, "/demo/add?a=2&b=3").unwrap(), "2+3=5");
}

#[test]
fn add_rejects_non_numeric_input() {
    let dispatcher = boot();
    let err = body_of(&dispatcher, "/demo/add?a=two&b=3").unwrap_err();
    assert!(matches!(err, DispatchError::ParameterBinding { name: "a", .. }));
}

#[test]
fn sub_coerces_float_parameters() {
    let dispatcher = boot();
    assert_eq!(
        body_of(&dispatcher, "/demo/sub?a=2.5&b=0.25").unwrap(),
        "2.5-0.25=2.25"
    );
}

#[test]
fn remove_forwards_returned_body() {
    let dispatcher = boot();
    assert_eq!(body_of(&dispatcher, "/demo/remove?id=7").unwrap(), "7");
}

#[test]
fn unknown_path_is_route_not_found() {
    let dispatcher = boot();
    let err = body_of(&dispatcher, "/demo/unknown").unwrap_err();
    assert!(matches!(err, DispatchError::RouteNotFound { .. }));
}

#[test]
fn normalized_route_variants_hit_the_same_handler() {
    let dispatcher = boot();
    assert_eq!(
        body_of(&dispatcher, "/demo//query?userName=Bob").unwrap(),
        "My name is Bob"
    );
    assert_eq!(
        body_of(&dispatcher, "demo/query/?userName=Bob").unwrap(),
        "My name is Bob"
    );
}

#[test]
fn capability_lookup_aliases_the_service_bean() {
    let dispatcher = boot();
    let registry = dispatcher.registry();

    let concrete = registry
        .get("demoService")
        .unwrap()
        .instance
        .clone()
        .downcast::<DemoService>()
        .unwrap();
    let as_trait: Arc<dyn GreetingService> = concrete;

    let capability = registry
        .get("GreetingService")
        .unwrap()
        .instance
        .downcast_ref::<Arc<dyn GreetingService>>()
        .unwrap();

    assert!(Arc::ptr_eq(&as_trait, capability));
}

#[test]
fn unmarked_interface_type_is_not_registered() {
    let dispatcher = boot();
    // trait 类型被发现但无标记，不应出现以默认键注册的条目
    assert!(dispatcher.registry().get("greetingService").is_none());
}

#[test]
fn unresolvable_scan_root_aborts_startup() {
    let err = AprilApplication::new("web-demo-test")
        .config(ApplicationConfig::new("no_such_namespace"))
        .run()
        .unwrap_err();
    assert!(matches!(
        err,
        BootError::Startup(StartupError::Configuration(_))
    ));
}
