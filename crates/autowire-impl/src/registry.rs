//! 不可变组件注册表
//!
//! `load` 是构建期边界：按模块前缀收集编译期注册的描述符，
//! 建成名称到描述符的只读映射。显式注册走 [`RegistryBuilder`]。

use autowire_abstractions::ComponentRegistry;
use autowire_common::{
    registration, ComponentDescriptor, ComponentError, ComponentResult, TypeInfo,
};
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// 组件注册表
///
/// 建成之后只读，解析器持有它直至进程结束。
#[derive(Debug)]
pub struct Registry {
    /// 名称到描述符的映射
    descriptors: HashMap<String, ComponentDescriptor>,
    /// 类型到名称的反向索引，解析时用于推导依赖名称
    names_by_type: HashMap<TypeId, String>,
}

impl Registry {
    /// 按模块前缀加载注册表
    ///
    /// 收集编译期注册表中位于 `package` 之下的全部组件；
    /// 组件名称冲突时整个加载失败。
    pub fn load(package: &str) -> ComponentResult<Self> {
        let descriptors = registration::descriptors_in_module(package);
        info!("加载模块 {}: 发现 {} 个组件", package, descriptors.len());
        Self::from_descriptors(descriptors)
    }

    /// 创建注册表构建器（显式注册路径）
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn from_descriptors(list: Vec<ComponentDescriptor>) -> ComponentResult<Self> {
        let mut descriptors: HashMap<String, ComponentDescriptor> = HashMap::new();
        let mut names_by_type = HashMap::new();

        for descriptor in list {
            if let Some(existing) = descriptors.get(&descriptor.name) {
                return Err(ComponentError::DuplicateComponentName {
                    name: descriptor.name.clone(),
                    first: existing.type_info.type_path.clone(),
                    second: descriptor.type_info.type_path.clone(),
                });
            }
            names_by_type.insert(descriptor.type_info.id, descriptor.name.clone());
            descriptors.insert(descriptor.name.clone(), descriptor);
        }

        Ok(Self {
            descriptors,
            names_by_type,
        })
    }

    /// 推导依赖边对应的组件名称
    ///
    /// 先查本注册表的类型索引，再查全局类型标记；
    /// 两处都没有说明该类型未被标记为组件。
    pub(crate) fn dependency_name(&self, target: &TypeInfo) -> Option<String> {
        self.names_by_type
            .get(&target.id)
            .cloned()
            .or_else(|| registration::component_name_of(target.id))
    }

    /// 校验注册表
    ///
    /// 走一遍所有依赖边，报告未标记的依赖类型、缺失的依赖目标
    /// 以及循环依赖。校验是提前体检，解析期仍会做同样的检查。
    pub fn validate(&self) -> Result<(), Vec<ComponentError>> {
        let mut errors = Vec::new();

        for descriptor in self.descriptors.values() {
            for dependency in descriptor.dependencies() {
                match self.dependency_name(dependency) {
                    None => errors.push(ComponentError::UnmarkedDependency {
                        component: descriptor.name.clone(),
                        type_name: dependency.type_path.clone(),
                    }),
                    Some(name) if !self.descriptors.contains_key(&name) => {
                        errors.push(ComponentError::MissingDependency {
                            component: descriptor.name.clone(),
                            target: name,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let mut visited = HashSet::new();
        let mut names: Vec<&String> = self.descriptors.keys().collect();
        names.sort();
        for name in names {
            if !visited.contains(name.as_str()) {
                self.dfs_cycle(name, &mut visited, &mut Vec::new(), &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 深度优先检测循环依赖
    fn dfs_cycle(
        &self,
        current: &str,
        visited: &mut HashSet<String>,
        path: &mut Vec<String>,
        errors: &mut Vec<ComponentError>,
    ) {
        if let Some(position) = path.iter().position(|entry| entry == current) {
            let mut cycle: Vec<String> = path[position..].to_vec();
            cycle.push(current.to_string());
            errors.push(ComponentError::CircularDependency {
                cycle: cycle.join(" -> "),
            });
            return;
        }
        if visited.contains(current) {
            return;
        }

        path.push(current.to_string());
        if let Some(descriptor) = self.descriptors.get(current) {
            for dependency in descriptor.dependencies() {
                if let Some(name) = self.dependency_name(dependency) {
                    if self.descriptors.contains_key(&name) {
                        self.dfs_cycle(&name, visited, path, errors);
                    }
                }
            }
        }
        path.pop();
        visited.insert(current.to_string());
    }
}

impl ComponentRegistry for Registry {
    fn descriptor(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.descriptors.get(name)
    }

    fn name_of_type(&self, type_id: TypeId) -> Option<&str> {
        self.names_by_type.get(&type_id).map(String::as_str)
    }

    fn component_names(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    fn len(&self) -> usize {
        self.descriptors.len()
    }
}

/// 注册表构建器
///
/// 不经过编译期注册表的显式组装路径。
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    descriptors: Vec<ComponentDescriptor>,
}

impl RegistryBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册组件描述符
    pub fn register(mut self, descriptor: ComponentDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// 构建注册表
    ///
    /// 与 [`Registry::load`] 同样的名称冲突检查。
    pub fn build(self) -> ComponentResult<Registry> {
        info!("构建注册表: {} 个组件", self.descriptors.len());
        Registry::from_descriptors(self.descriptors)
    }
}
