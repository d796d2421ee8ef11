//! Bean 注册表（IoC 容器）
//!
//! 消费发现阶段产出的类型名集合，对携带标记的类型做饿汉式构造并登记。
//! Service 额外按其声明的每个能力名登记一条次级条目，指向同一实例；
//! 一个能力至多一个实现，冲突即启动失败。
//!
//! 注册表一旦构建完成即不可变，之后只读，可跨线程并发访问。

use std::collections::HashMap;

use crate::error::{StartupError, StartupResult};
use crate::marker::{BeanInstance, ComponentSpec, MarkerKind, TypeDescriptor};
use crate::utils::naming;

/// 注册表中的一条实例记录
///
/// 主记录与能力别名共享同一底层实例。
pub struct BeanHandle {
    /// 注册键
    pub name: String,

    /// 实例的来源类型（能力别名也记实现类型）
    pub type_name: &'static str,

    /// 单例实例
    pub instance: BeanInstance,
}

/// Bean 定义：主 Bean 的注册键与其元数据
///
/// 注入器与路由构建器按定义遍历，不遍历能力别名。
pub struct BeanDefinition {
    /// 注册键
    pub name: String,

    /// 全限定类型名
    pub type_name: &'static str,

    /// 组件元数据
    pub spec: &'static ComponentSpec,
}

/// IoC 容器
pub struct BeanRegistry {
    beans: HashMap<String, BeanHandle>,
    definitions: Vec<BeanDefinition>,
}

impl BeanRegistry {
    /// 从发现阶段的类型名集合构建注册表
    ///
    /// 集合中每个名字都应对应一条链接期收集的类型描述符；
    /// 没有组件标记的描述符被跳过。
    pub fn from_scan<'a>(names: impl IntoIterator<Item = &'a &'static str>) -> StartupResult<Self> {
        let table: HashMap<&'static str, &'static TypeDescriptor> =
            inventory::iter::<TypeDescriptor>()
                .map(|descriptor| (descriptor.type_name, descriptor))
                .collect();

        let descriptors = names
            .into_iter()
            .filter_map(|name| table.get(name).copied());

        Self::from_descriptors(descriptors)
    }

    /// 从类型描述符直接构建注册表
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = &'static TypeDescriptor>,
    ) -> StartupResult<Self> {
        let mut registry = Self {
            beans: HashMap::new(),
            definitions: Vec::new(),
        };

        for descriptor in descriptors {
            let Some(spec) = descriptor.component() else {
                // 无标记类型：发现范围宽于可注册范围，这里直接跳过
                tracing::debug!("type '{}' carries no marker, skipped", descriptor.type_name);
                continue;
            };

            match spec.kind {
                MarkerKind::Controller => registry.register_controller(descriptor, spec)?,
                MarkerKind::Service => registry.register_service(descriptor, spec)?,
            }
        }

        tracing::info!(
            "Bean registry initialized: {} definition(s), {} entry(ies)",
            registry.definitions.len(),
            registry.beans.len()
        );

        Ok(registry)
    }

    fn register_controller(
        &mut self,
        descriptor: &'static TypeDescriptor,
        spec: &'static ComponentSpec,
    ) -> StartupResult<()> {
        let name = naming::default_bean_name(descriptor.type_name);
        let instance = Self::construct(descriptor, spec)?;
        self.insert_definition(name, descriptor, spec, instance)
    }

    fn register_service(
        &mut self,
        descriptor: &'static TypeDescriptor,
        spec: &'static ComponentSpec,
    ) -> StartupResult<()> {
        // 不同模块下同名类型需要显式取一个全局唯一的名称
        let name = if spec.name.is_empty() {
            naming::default_bean_name(descriptor.type_name)
        } else {
            spec.name.to_string()
        };

        let instance = Self::construct(descriptor, spec)?;
        self.insert_definition(name, descriptor, spec, instance.clone())?;

        for capability in spec.capabilities {
            if let Some(existing) = self.beans.get(capability.name) {
                return Err(StartupError::DuplicateCapability {
                    capability: capability.name,
                    existing: existing.type_name.to_string(),
                    incoming: descriptor.type_name,
                });
            }

            let bound = (capability.bind)(&instance).ok_or_else(|| {
                StartupError::BeanConstruction {
                    type_name: descriptor.type_name,
                    source: anyhow::anyhow!(
                        "capability '{}' bind function rejected the instance",
                        capability.name
                    ),
                }
            })?;

            tracing::debug!(
                "bound capability '{}' -> '{}'",
                capability.name,
                descriptor.type_name
            );

            self.beans.insert(
                capability.name.to_string(),
                BeanHandle {
                    name: capability.name.to_string(),
                    type_name: descriptor.type_name,
                    instance: bound,
                },
            );
        }

        Ok(())
    }

    fn construct(
        descriptor: &TypeDescriptor,
        spec: &ComponentSpec,
    ) -> StartupResult<BeanInstance> {
        (spec.construct)().map_err(|source| StartupError::BeanConstruction {
            type_name: descriptor.type_name,
            source,
        })
    }

    fn insert_definition(
        &mut self,
        name: String,
        descriptor: &'static TypeDescriptor,
        spec: &'static ComponentSpec,
        instance: BeanInstance,
    ) -> StartupResult<()> {
        if let Some(existing) = self.beans.get(&name) {
            return Err(StartupError::DuplicateBean {
                name,
                existing: existing.type_name,
                incoming: descriptor.type_name,
            });
        }

        tracing::debug!("registered bean '{}' of type '{}'", name, descriptor.type_name);

        self.beans.insert(
            name.clone(),
            BeanHandle {
                name: name.clone(),
                type_name: descriptor.type_name,
                instance,
            },
        );
        self.definitions.push(BeanDefinition {
            name,
            type_name: descriptor.type_name,
            spec,
        });

        Ok(())
    }

    /// 按注册键（或能力名）查找实例
    pub fn get(&self, name: &str) -> Option<&BeanHandle> {
        self.beans.get(name)
    }

    /// 是否存在指定名称的条目
    pub fn contains(&self, name: &str) -> bool {
        self.beans.contains_key(name)
    }

    /// 遍历主 Bean 定义
    pub fn definitions(&self) -> impl Iterator<Item = &BeanDefinition> {
        self.definitions.iter()
    }

    /// 主 Bean 数量
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// 所有注册键（含能力别名）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.beans.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for BeanRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanRegistry")
            .field("definitions", &self.definitions.len())
            .field("entries", &self.beans.len())
            .finish()
    }
}
