// 演示业务逻辑：一个问候服务和一个 /demo 控制器

pub mod controller;
pub mod service;
