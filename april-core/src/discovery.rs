//! 组件发现
//!
//! 递归遍历命名空间，产出其下可达的全限定类型名集合。
//! 只做枚举，不做任何实例化。

use std::collections::BTreeSet;

use crate::error::{StartupError, StartupResult};
use crate::marker::TypeDescriptor;

/// 组件扫描器
///
/// 以模块路径前缀为扫描根，从链接期收集的类型描述符表中
/// 筛选出位于该命名空间下的类型名。
pub struct ComponentScanner {
    scan_root: String,
}

impl ComponentScanner {
    /// 创建扫描器，`scan_root` 为模块路径，如 "web_demo" 或 "web_demo::controller"
    pub fn new(scan_root: impl Into<String>) -> Self {
        Self {
            scan_root: scan_root.into(),
        }
    }

    /// 执行扫描，返回类型名集合
    ///
    /// 下游按集合消费，顺序无意义。扫描根解析不到任何类型时视为
    /// 不可解析，返回配置错误，后续阶段不再执行。
    pub fn scan(&self) -> StartupResult<BTreeSet<&'static str>> {
        if self.scan_root.is_empty() {
            return Err(StartupError::Configuration(
                "scan root must not be empty".to_string(),
            ));
        }

        let names: BTreeSet<&'static str> = inventory::iter::<TypeDescriptor>()
            .filter(|descriptor| Self::under_root(descriptor.type_name, &self.scan_root))
            .map(|descriptor| descriptor.type_name)
            .collect();

        if names.is_empty() {
            return Err(StartupError::Configuration(format!(
                "scan root '{}' does not resolve to any known type",
                self.scan_root
            )));
        }

        tracing::info!(
            "Component scan under '{}' discovered {} type(s)",
            self.scan_root,
            names.len()
        );
        for name in &names {
            tracing::debug!("discovered type: {}", name);
        }

        Ok(names)
    }

    /// 类型名位于扫描根之下：前缀相等且边界落在 "::" 上
    fn under_root(type_name: &str, root: &str) -> bool {
        match type_name.strip_prefix(root) {
            Some(rest) => rest.is_empty() || rest.starts_with("::"),
            None => false,
        }
    }
}
