use april_web::prelude::*;
// 链接 lib target，让其中的组件元数据进入链接期收集
use web_demo as _;

fn main() -> anyhow::Result<()> {
    let dispatcher = AprilApplication::new("web-demo")
        .config_file(concat!(env!("CARGO_MANIFEST_DIR"), "/application.toml"))
        .run()?;

    // 传输层不在系统范围内，这里用进程内请求演示派发
    let targets = [
        "/demo/query?userName=Alice",
        "/demo/add?a=2&b=3",
        "/demo/sub?a=2.5&b=0.25",
        "/demo/remove?id=7",
        "/demo/add?a=two&b=3",
        "/demo/unknown",
    ];

    for target in targets {
        let request = WebRequest::parse(target);
        let mut response = BufferedResponse::new();
        match dispatcher.dispatch(&request, &mut response) {
            Ok(()) => tracing::info!("{} -> {}", target, response.body()),
            Err(e) => tracing::warn!("{} -> {}", target, e),
        }
    }

    Ok(())
}
