//! 组件标记 trait 与实例/闭包别名
//!
//! 所有可被容器解析的类型都实现 [`Component`]

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// 组件标记 trait
///
/// 由 `#[component]` 宏实现，也可以手工实现后通过
/// 描述符构建器显式注册。
pub trait Component: Send + Sync + Debug + 'static {
    /// 组件名称（解析时使用的字符串键）
    fn name(&self) -> &'static str;
}

/// 装箱的组件实例
///
/// 解析结果始终是新建实例，所有权完全归调用方。
pub type BoxedComponent = Box<dyn Any + Send + Sync>;

/// 装箱的构造错误
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// 构造函数注入的工厂闭包
///
/// 入参为按参数声明顺序排列的已解析依赖列表。
pub type ConstructFn =
    Arc<dyn Fn(Vec<BoxedComponent>) -> Result<BoxedComponent, BoxedError> + Send + Sync>;

/// 无参构造闭包
pub type ParameterlessFn = Arc<dyn Fn() -> Result<BoxedComponent, BoxedError> + Send + Sync>;

/// 字段赋值闭包
///
/// 在宿主实例上写入已解析的依赖，保持封装（不做任何可见性绕过）。
pub type FieldAssignFn =
    Arc<dyn Fn(&mut BoxedComponent, BoxedComponent) -> Result<(), BoxedError> + Send + Sync>;
