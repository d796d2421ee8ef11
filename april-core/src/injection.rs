//! 依赖注入
//!
//! 注入在全量注册完成之后整体执行一遍（两阶段启动），
//! 所有 Bean 在注入开始前都已构造完毕，循环引用因此天然可解。
//!
//! 解析规则：槽上有显式名用显式名，否则用槽的声明类型名——
//! 后者与能力登记同名，接口类型的槽由此找到被绑定的实现。
//! 解析落空时默认保持槽为空，严格模式下报错。

use std::sync::{Arc, OnceLock};

use crate::error::{StartupError, StartupResult};
use crate::registry::BeanRegistry;

/// 注入槽单元
///
/// 写一次、读多次的依赖槽。启动期由容器填充一次，之后只读；
/// 未被解析到的槽保持为空（显式的"未解析"占位）。
pub struct Autowired<T: ?Sized + Send + Sync + 'static> {
    cell: OnceLock<Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Autowired<T> {
    /// 创建空槽
    pub const fn empty() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// 填充槽。注入阶段只会调用一次，重复填充被忽略。
    pub fn inject(&self, value: Arc<T>) {
        if self.cell.set(value).is_err() {
            tracing::warn!("autowired slot already filled, ignoring repeated injection");
        }
    }

    /// 读取槽，未解析时返回 None
    pub fn get(&self) -> Option<&Arc<T>> {
        self.cell.get()
    }

    /// 槽是否已被填充
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Default for Autowired<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized + Send + Sync + 'static> std::fmt::Debug for Autowired<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autowired")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// 对注册表中的每个 Bean 执行一次依赖注入
///
/// `strict` 为 true 时，解析落空直接以 `UnresolvedDependency` 中止启动。
pub fn inject_all(registry: &BeanRegistry, strict: bool) -> StartupResult<()> {
    for definition in registry.definitions() {
        let Some(owner) = registry.get(&definition.name) else {
            // definitions 与 beans 同步维护，这里不可能落空
            continue;
        };

        for slot in definition.spec.slots {
            let target = if slot.qualifier.is_empty() {
                slot.declared_type
            } else {
                slot.qualifier
            };

            let dependency = registry.get(target);

            match dependency {
                Some(handle) => {
                    tracing::debug!(
                        "injecting '{}' into bean '{}' slot '{}'",
                        target,
                        definition.name,
                        slot.field
                    );
                    (slot.assign)(&owner.instance, Some(&handle.instance)).map_err(|source| {
                        StartupError::Injection {
                            bean: definition.name.clone(),
                            slot: slot.field,
                            source,
                        }
                    })?;
                }
                None if strict => {
                    return Err(StartupError::UnresolvedDependency {
                        bean: definition.name.clone(),
                        slot: slot.field,
                        target: target.to_string(),
                    });
                }
                None => {
                    // 宽容模式：槽保持未填充
                    tracing::warn!(
                        "bean '{}' slot '{}' resolves nothing for '{}', left unfilled",
                        definition.name,
                        slot.field,
                        target
                    );
                }
            }
        }
    }

    tracing::info!("dependency injection completed for {} bean(s)", registry.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{
        BeanInstance, CapabilitySpec, ComponentSpec, MarkerKind, SlotSpec, TypeDescriptor,
    };
    use anyhow::Context;

    // 测试夹具：Left 与 Right 互相引用（循环依赖），
    // Holder 通过能力名注入接口实现。

    #[derive(Default)]
    struct LeftService {
        right: Autowired<RightService>,
    }

    #[derive(Default)]
    struct RightService {
        left: Autowired<LeftService>,
    }

    trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }

    #[derive(Default)]
    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> u64 {
            42
        }
    }

    #[derive(Default)]
    struct Holder {
        clock: Autowired<dyn Clock>,
        missing: Autowired<RightService>,
    }

    fn construct_left() -> anyhow::Result<BeanInstance> {
        Ok(Arc::new(LeftService::default()))
    }

    fn construct_right() -> anyhow::Result<BeanInstance> {
        Ok(Arc::new(RightService::default()))
    }

    fn construct_clock() -> anyhow::Result<BeanInstance> {
        Ok(Arc::new(FixedClock))
    }

    fn construct_holder() -> anyhow::Result<BeanInstance> {
        Ok(Arc::new(Holder::default()))
    }

    fn bind_clock(instance: &BeanInstance) -> Option<BeanInstance> {
        let concrete = instance.clone().downcast::<FixedClock>().ok()?;
        let capability: Arc<dyn Clock> = concrete;
        Some(Arc::new(capability))
    }

    fn assign_left_right(owner: &BeanInstance, dep: Option<&BeanInstance>) -> anyhow::Result<()> {
        let left = owner
            .downcast_ref::<LeftService>()
            .context("owner is not LeftService")?;
        if let Some(dep) = dep {
            let right = dep
                .clone()
                .downcast::<RightService>()
                .map_err(|_| anyhow::anyhow!("dependency is not RightService"))?;
            left.right.inject(right);
        }
        Ok(())
    }

    fn assign_right_left(owner: &BeanInstance, dep: Option<&BeanInstance>) -> anyhow::Result<()> {
        let right = owner
            .downcast_ref::<RightService>()
            .context("owner is not RightService")?;
        if let Some(dep) = dep {
            let left = dep
                .clone()
                .downcast::<LeftService>()
                .map_err(|_| anyhow::anyhow!("dependency is not LeftService"))?;
            right.left.inject(left);
        }
        Ok(())
    }

    fn assign_holder_clock(owner: &BeanInstance, dep: Option<&BeanInstance>) -> anyhow::Result<()> {
        let holder = owner
            .downcast_ref::<Holder>()
            .context("owner is not Holder")?;
        if let Some(dep) = dep {
            let clock = dep
                .downcast_ref::<Arc<dyn Clock>>()
                .context("dependency is not a Clock capability")?;
            holder.clock.inject(Arc::clone(clock));
        }
        Ok(())
    }

    fn assign_holder_missing(
        owner: &BeanInstance,
        dep: Option<&BeanInstance>,
    ) -> anyhow::Result<()> {
        let holder = owner
            .downcast_ref::<Holder>()
            .context("owner is not Holder")?;
        if let Some(dep) = dep {
            let right = dep
                .clone()
                .downcast::<RightService>()
                .map_err(|_| anyhow::anyhow!("dependency is not RightService"))?;
            holder.missing.inject(right);
        }
        Ok(())
    }

    static LEFT: TypeDescriptor = TypeDescriptor {
        type_name: "fixtures::injection::LeftService",
        component: Some(ComponentSpec {
            kind: MarkerKind::Service,
            name: "",
            base_path: "",
            construct: construct_left,
            capabilities: &[],
            slots: &[SlotSpec {
                field: "right",
                declared_type: "RightService",
                qualifier: "rightService",
                assign: assign_left_right,
            }],
        }),
    };

    static RIGHT: TypeDescriptor = TypeDescriptor {
        type_name: "fixtures::injection::RightService",
        component: Some(ComponentSpec {
            kind: MarkerKind::Service,
            name: "",
            base_path: "",
            construct: construct_right,
            capabilities: &[],
            slots: &[SlotSpec {
                field: "left",
                declared_type: "LeftService",
                qualifier: "leftService",
                assign: assign_right_left,
            }],
        }),
    };

    static CLOCK: TypeDescriptor = TypeDescriptor {
        type_name: "fixtures::injection::FixedClock",
        component: Some(ComponentSpec {
            kind: MarkerKind::Service,
            name: "",
            base_path: "",
            construct: construct_clock,
            capabilities: &[CapabilitySpec {
                name: "Clock",
                bind: bind_clock,
            }],
            slots: &[],
        }),
    };

    static HOLDER: TypeDescriptor = TypeDescriptor {
        type_name: "fixtures::injection::Holder",
        component: Some(ComponentSpec {
            kind: MarkerKind::Service,
            name: "",
            base_path: "",
            construct: construct_holder,
            capabilities: &[],
            slots: &[
                SlotSpec {
                    field: "clock",
                    declared_type: "Clock",
                    qualifier: "",
                    assign: assign_holder_clock,
                },
                SlotSpec {
                    field: "missing",
                    declared_type: "NoSuchBean",
                    qualifier: "",
                    assign: assign_holder_missing,
                },
            ],
        }),
    };

    fn resolved_pair(registry: &BeanRegistry) -> (bool, bool) {
        let left = registry
            .get("leftService")
            .unwrap()
            .instance
            .downcast_ref::<LeftService>()
            .unwrap()
            .right
            .is_resolved();
        let right = registry
            .get("rightService")
            .unwrap()
            .instance
            .downcast_ref::<RightService>()
            .unwrap()
            .left
            .is_resolved();
        (left, right)
    }

    #[test]
    fn test_cyclic_dependencies_resolve_in_both_orders() {
        for descriptors in [[&LEFT, &RIGHT], [&RIGHT, &LEFT]] {
            let registry = BeanRegistry::from_descriptors(descriptors).unwrap();
            inject_all(&registry, false).unwrap();
            assert_eq!(resolved_pair(&registry), (true, true));
        }
    }

    #[test]
    fn test_interface_slot_resolves_through_capability_name() {
        let registry = BeanRegistry::from_descriptors([&CLOCK, &HOLDER]).unwrap();
        inject_all(&registry, false).unwrap();

        let holder = registry
            .get("holder")
            .unwrap()
            .instance
            .downcast_ref::<Holder>()
            .unwrap();

        assert_eq!(holder.clock.get().unwrap().now(), 42);
    }

    #[test]
    fn test_unresolved_slot_stays_empty_in_permissive_mode() {
        let registry = BeanRegistry::from_descriptors([&CLOCK, &HOLDER]).unwrap();
        inject_all(&registry, false).unwrap();

        let holder = registry
            .get("holder")
            .unwrap()
            .instance
            .downcast_ref::<Holder>()
            .unwrap();

        assert!(!holder.missing.is_resolved());
    }

    #[test]
    fn test_unresolved_slot_fails_in_strict_mode() {
        let registry = BeanRegistry::from_descriptors([&CLOCK, &HOLDER]).unwrap();
        let err = inject_all(&registry, true).unwrap_err();
        assert!(matches!(
            err,
            StartupError::UnresolvedDependency { slot: "missing", .. }
        ));
    }
}
