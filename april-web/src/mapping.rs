//! 处理器映射（路由表）
//!
//! 遍历注册表中携带 Controller 标记的 Bean，把类型级路径前缀与
//! 方法级路径拼接并归一化为路由键，登记一条处理器描述。
//! 路由表构建一次，之后只读。

use std::collections::HashMap;

use april_core::marker::MarkerKind;
use april_core::registry::BeanRegistry;

use crate::error::MappingError;
use crate::handler::RouteDescriptor;

/// 归一化路由路径
///
/// 折叠连续分隔符、强制前导 '/'、去掉尾部 '/'（根除外），
/// 使 "/demo//query"、"demo/query/" 与 "/demo/query" 指向同一路由键。
pub fn normalize_path(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len() + 1);
    normalized.push('/');
    for segment in raw.split('/').filter(|s| !s.is_empty()) {
        normalized.push_str(segment);
        normalized.push('/');
    }
    if normalized.len() > 1 {
        normalized.pop();
    }
    normalized
}

/// 路由表条目：一条路由对应唯一一个处理器描述
pub struct RouteEntry {
    /// 归一化后的路由键
    pub path: String,

    /// 所属 Bean 的注册键
    pub bean_name: String,

    /// 处理方法名
    pub handler: &'static str,

    /// 处理器元数据
    pub descriptor: &'static RouteDescriptor,
}

/// 处理器映射器
pub struct HandlerMapping {
    routes: HashMap<String, RouteEntry>,
}

impl HandlerMapping {
    /// 从注册表与链接期收集的路由描述符构建路由表
    pub fn build(registry: &BeanRegistry) -> Result<Self, MappingError> {
        Self::build_from(registry, inventory::iter::<RouteDescriptor>())
    }

    /// 从显式给定的路由描述符构建路由表
    pub fn build_from(
        registry: &BeanRegistry,
        descriptors: impl IntoIterator<Item = &'static RouteDescriptor>,
    ) -> Result<Self, MappingError> {
        let descriptors: Vec<&'static RouteDescriptor> = descriptors.into_iter().collect();
        let mut routes: HashMap<String, RouteEntry> = HashMap::new();

        for definition in registry.definitions() {
            if definition.spec.kind != MarkerKind::Controller {
                continue;
            }

            let base_path = definition.spec.base_path;

            for descriptor in descriptors
                .iter()
                .copied()
                .filter(|d| d.controller == definition.type_name)
            {
                let path = normalize_path(&format!("/{}/{}", base_path, descriptor.path));

                if let Some(existing) = routes.get(&path) {
                    return Err(MappingError::AmbiguousRoute {
                        path,
                        existing: format!("{}::{}", existing.bean_name, existing.handler),
                        incoming: format!("{}::{}", definition.name, descriptor.handler),
                    });
                }

                tracing::info!(
                    "mapped route '{}' -> {}::{}",
                    path,
                    definition.name,
                    descriptor.handler
                );

                routes.insert(
                    path.clone(),
                    RouteEntry {
                        path,
                        bean_name: definition.name.clone(),
                        handler: descriptor.handler,
                        descriptor,
                    },
                );
            }
        }

        if routes.is_empty() {
            tracing::warn!("handler mapping is empty, no controller routes registered");
        }

        Ok(Self { routes })
    }

    /// 按归一化路径查找路由
    pub fn lookup(&self, path: &str) -> Option<&RouteEntry> {
        self.routes.get(path)
    }

    /// 路由条数
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// 路由表是否为空
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// 所有路由键
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for HandlerMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerMapping")
            .field("routes", &self.routes.len())
            .finish()
    }
}
