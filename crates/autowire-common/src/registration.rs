//! 编译期注册表
//!
//! `#[component]` 与 `#[autowired]` 宏生成的注册函数在程序启动时
//! （`ctor`）向这里写入描述符与构造函数绑定，之后表内容只读。
//! 模块扫描与解析期的名称推导都查这张表。

use crate::component::ConstructFn;
use crate::descriptor::{ComponentDescriptor, InjectionStrategy};
use crate::metadata::TypeInfo;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

/// 注入构造函数绑定
///
/// 由 `#[autowired]` 宏注册，在加载时覆盖目标类型的注入策略。
#[derive(Clone)]
pub struct ConstructorBinding {
    /// 目标组件类型
    pub target: TypeInfo,
    /// 参数声明类型，按顺序
    pub params: Vec<TypeInfo>,
    /// 构造闭包
    pub construct: ConstructFn,
}

impl std::fmt::Debug for ConstructorBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorBinding")
            .field("target", &self.target)
            .field("params", &self.params)
            .field("construct", &"<function>")
            .finish()
    }
}

/// 单个类型的编译期注册信息
///
/// 描述符一半来自 `#[component]`，构造函数一半来自 `#[autowired]`；
/// 两个 `ctor` 函数的执行顺序不确定，所以两半独立落表、加载时合并。
#[derive(Debug, Clone, Default)]
struct CompileTimeRegistration {
    descriptor: Option<ComponentDescriptor>,
    constructor: Option<ConstructorBinding>,
}

/// 全局编译期注册表
static COMPILE_TIME_REGISTRATIONS: Lazy<RwLock<HashMap<TypeId, CompileTimeRegistration>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 注册组件描述符
///
/// 同一类型重复注册时保留首次注册，后到者被忽略并在 stderr 报告
/// （`ctor` 阶段尚无日志订阅者）。
pub fn register_component_descriptor(descriptor: ComponentDescriptor) {
    let type_id = descriptor.type_info.id;
    let mut table = COMPILE_TIME_REGISTRATIONS.write();
    let entry = table.entry(type_id).or_default();
    if entry.descriptor.is_some() {
        eprintln!(
            "组件重复注册被忽略: {} ({})",
            descriptor.name, descriptor.type_info.type_path
        );
        return;
    }
    entry.descriptor = Some(descriptor);
}

/// 注册注入构造函数绑定
///
/// 每个类型至多一个注入构造函数；重复注册保留首个。
pub fn register_constructor_binding(binding: ConstructorBinding) {
    let type_id = binding.target.id;
    let mut table = COMPILE_TIME_REGISTRATIONS.write();
    let entry = table.entry(type_id).or_default();
    if entry.constructor.is_some() {
        eprintln!("注入构造函数重复注册被忽略: {}", binding.target.type_path);
        return;
    }
    entry.constructor = Some(binding);
}

/// 根据类型标记推导组件名称
///
/// 解析器在解析依赖边时调用；返回 `None` 表示该类型没有组件标记。
pub fn component_name_of(type_id: TypeId) -> Option<String> {
    COMPILE_TIME_REGISTRATIONS
        .read()
        .get(&type_id)
        .and_then(|registration| registration.descriptor.as_ref())
        .map(|descriptor| descriptor.name.clone())
}

/// 合并注册信息的两半
///
/// 构造函数注入优先于字段注入；只有构造函数而没有组件标记的
/// 类型不是组件，返回 `None`。
fn merged_descriptor(registration: &CompileTimeRegistration) -> Option<ComponentDescriptor> {
    let mut descriptor = registration.descriptor.clone()?;
    if let Some(binding) = &registration.constructor {
        descriptor.strategy = InjectionStrategy::Constructor {
            params: binding.params.clone(),
            construct: binding.construct.clone(),
        };
    }
    Some(descriptor)
}

/// 收集指定模块前缀下的全部组件描述符
pub fn descriptors_in_module(prefix: &str) -> Vec<ComponentDescriptor> {
    let table = COMPILE_TIME_REGISTRATIONS.read();
    let descriptors: Vec<ComponentDescriptor> = table
        .values()
        .filter_map(merged_descriptor)
        .filter(|descriptor| descriptor.type_info.is_in_module(prefix))
        .collect();
    debug!("扫描模块 {} 命中 {} 个组件", prefix, descriptors.len());
    descriptors
}
