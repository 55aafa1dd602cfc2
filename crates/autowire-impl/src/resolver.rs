//! 组件解析器
//!
//! 深度优先的递归解析：无记忆化、无实例缓存，每次调用都产出
//! 全新的对象图。注册表由解析器持有且只读。

use crate::registry::Registry;
use autowire_abstractions::{ComponentRegistry, ComponentResolver, ResolveContext};
use autowire_common::{
    BoxedComponent, InjectionStrategy, ResolveError, ResolveResult, TypeInfo,
};
use tracing::debug;

/// 组件解析器
pub struct Resolver {
    registry: Registry,
}

impl Resolver {
    /// 用注册表创建解析器
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// 解析器持有的注册表
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// 解析指定名称的组件
    ///
    /// 解析树中任何一处失败都会使整个调用失败；没有重试，
    /// 没有部分结果。
    pub fn resolve(&self, name: &str) -> ResolveResult<BoxedComponent> {
        let mut context = ResolveContext::new();
        self.resolve_in_context(name, &mut context)
    }

    /// 解析并向下转型为具体类型
    pub fn resolve_as<T: Send + Sync + 'static>(&self, name: &str) -> ResolveResult<T> {
        let instance = self.resolve(name)?;
        instance
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ResolveError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: self
                    .registry
                    .descriptor(name)
                    .map(|descriptor| descriptor.type_info.type_path.clone())
                    .unwrap_or_else(|| "未知类型".to_string()),
            })
    }

    fn resolve_in_context(
        &self,
        name: &str,
        context: &mut ResolveContext,
    ) -> ResolveResult<BoxedComponent> {
        context.enter(name)?;
        let result = self.resolve_entered(name, context);
        context.leave();
        result
    }

    fn resolve_entered(
        &self,
        name: &str,
        context: &mut ResolveContext,
    ) -> ResolveResult<BoxedComponent> {
        let Some(descriptor) = self.registry.descriptor(name) else {
            return Err(ResolveError::UnknownComponent {
                name: name.to_string(),
                chain: context.chain_display(),
            });
        };
        debug!("解析组件: {} (深度 {})", name, context.depth());

        match &descriptor.strategy {
            InjectionStrategy::Constructor { params, construct } => {
                let mut args = Vec::with_capacity(params.len());
                for param in params {
                    let dependency = self.dependency_name(param, context)?;
                    args.push(self.resolve_in_context(&dependency, context)?);
                }
                construct(args).map_err(|source| ResolveError::ConstructionFailure {
                    name: name.to_string(),
                    chain: context.chain_display(),
                    source,
                })
            }
            InjectionStrategy::Fields { construct, fields } => {
                let mut instance =
                    construct().map_err(|source| ResolveError::ConstructionFailure {
                        name: name.to_string(),
                        chain: context.chain_display(),
                        source,
                    })?;
                for field in fields {
                    let dependency = self.dependency_name(&field.target, context)?;
                    let value = self.resolve_in_context(&dependency, context)?;
                    (field.assign)(&mut instance, value).map_err(|source| {
                        ResolveError::ConstructionFailure {
                            name: name.to_string(),
                            chain: context.chain_display(),
                            source,
                        }
                    })?;
                }
                Ok(instance)
            }
        }
    }

    /// 从依赖边的类型标记推导组件名称
    fn dependency_name(&self, target: &TypeInfo, context: &ResolveContext) -> ResolveResult<String> {
        self.registry
            .dependency_name(target)
            .ok_or_else(|| ResolveError::InvalidInjectionTarget {
                type_name: target.type_path.clone(),
                chain: context.chain_display(),
            })
    }
}

impl ComponentResolver for Resolver {
    fn resolve(&self, name: &str) -> ResolveResult<BoxedComponent> {
        Resolver::resolve(self, name)
    }

    fn can_resolve(&self, name: &str) -> bool {
        self.registry.contains(name)
    }
}
