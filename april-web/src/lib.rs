// april-web: 基于 april-core 容器的微型 MVC 运行时
//
// 提供：
// - 请求/响应抽象（传输层是外部协作者，这里只定义派发所需的契约）
// - 处理器元数据与路由表构建（类型级前缀 + 方法级路径，归一化去重）
// - 请求派发：路由查找、参数绑定与类型转换、反射式调用、失败隔离

pub mod app;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod mapping;
pub mod request;

// 重新导出常用类型
pub use app::AprilApplication;
pub use dispatch::Dispatcher;
pub use error::{BootError, DispatchError, MappingError};
pub use handler::{ArgValue, HandlerCall, HandlerFn, ParamSource, ParamType, ParameterSpec, RouteDescriptor};
pub use mapping::{normalize_path, HandlerMapping, RouteEntry};
pub use request::{BufferedResponse, ResponseWriter, WebRequest};

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::app::AprilApplication;
    pub use crate::dispatch::Dispatcher;
    pub use crate::error::{BootError, DispatchError, MappingError};
    pub use crate::handler::{
        ArgValue, HandlerCall, HandlerFn, ParamSource, ParamType, ParameterSpec, RouteDescriptor,
    };
    pub use crate::mapping::{normalize_path, HandlerMapping, RouteEntry};
    pub use crate::request::{BufferedResponse, ResponseWriter, WebRequest};
    pub use april_core::prelude::*;
}
