//! # Autowire Common
//!
//! 这个 crate 提供 autowire 容器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`Component`] - 组件标记 trait
//! - [`TypeInfo`] - 类型元数据
//! - [`ComponentDescriptor`] - 组件描述符（名称 + 注入策略）
//! - [`InjectionStrategy`] - 注入策略（构造函数注入 / 字段注入）
//! - [`ResolveError`] / [`ComponentError`] - 错误类型
//!
//! ## 设计原则
//!
//! - 注册表在启动阶段一次性建成，之后只读
//! - 描述符在注册时确定注入策略，解析时不再推导
//! - 依赖边记录的是类型元数据，组件名称在解析时由类型标记推导

pub mod component;
pub mod descriptor;
pub mod errors;
pub mod metadata;
pub mod registration;

pub use component::*;
pub use descriptor::*;
pub use errors::*;
pub use metadata::*;
pub use registration::*;
