//! 错误类型定义

use crate::component::BoxedError;
use thiserror::Error;

/// 解析错误类型
///
/// 解析树中任何一处失败都会立即沿调用链向上传播，
/// 错误携带失败点名称与当时的解析链。
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("未找到组件: {name} (解析链: {chain})")]
    UnknownComponent { name: String, chain: String },

    #[error("依赖类型未标记为组件: {type_name} (解析链: {chain})")]
    InvalidInjectionTarget { type_name: String, chain: String },

    #[error("组件构造失败: {name} (解析链: {chain}), 原因: {source}")]
    ConstructionFailure {
        name: String,
        chain: String,
        #[source]
        source: BoxedError,
    },

    #[error("检测到循环依赖: {chain}")]
    CircularDependency { chain: String },

    #[error("组件类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },
}

/// 组件注册与扫描错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件名称重复: {name} ({first} 与 {second})")]
    DuplicateComponentName {
        name: String,
        first: String,
        second: String,
    },

    #[error("注入策略冲突: {type_name} 同时声明了构造函数注入与字段注入")]
    ConflictingStrategies { type_name: String },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },

    #[error("组件扫描失败: {message}")]
    ScanError { message: String },

    #[error("依赖目标缺失: {component} 依赖的 {target} 不在注册表中")]
    MissingDependency { component: String, target: String },

    #[error("依赖类型未标记: {component} 依赖的 {type_name} 没有组件标记")]
    UnmarkedDependency { component: String, type_name: String },

    #[error("检测到循环依赖: {cycle}")]
    CircularDependency { cycle: String },
}

/// 结果类型别名
pub type ResolveResult<T> = Result<T, ResolveError>;
pub type ComponentResult<T> = Result<T, ComponentError>;
