//! 组件描述符与注入策略
//!
//! 注入策略在注册时一次性确定，解析阶段只做查表和递归。

use crate::component::{BoxedComponent, BoxedError, ConstructFn, FieldAssignFn, ParameterlessFn};
use crate::errors::ComponentError;
use crate::metadata::TypeInfo;
use std::sync::Arc;

/// 字段注入项
///
/// `target` 记录字段声明类型的元数据，对应的组件名称在解析时
/// 由该类型自身的标记推导。
#[derive(Clone)]
pub struct FieldInjection {
    /// 字段名
    pub field_name: &'static str,
    /// 字段声明类型
    pub target: TypeInfo,
    /// 赋值闭包，由类型定义处生成
    pub assign: FieldAssignFn,
}

impl std::fmt::Debug for FieldInjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldInjection")
            .field("field_name", &self.field_name)
            .field("target", &self.target)
            .field("assign", &"<function>")
            .finish()
    }
}

/// 注入策略
///
/// 每个组件只有一种策略，构造函数注入与字段注入互斥。
#[derive(Clone)]
pub enum InjectionStrategy {
    /// 构造函数注入：参数按声明顺序解析后一次性传入
    Constructor {
        /// 参数声明类型，按顺序
        params: Vec<TypeInfo>,
        /// 构造闭包
        construct: ConstructFn,
    },
    /// 字段注入：先无参构造，再逐字段写入依赖
    Fields {
        /// 无参构造闭包
        construct: ParameterlessFn,
        /// 注入字段列表
        fields: Vec<FieldInjection>,
    },
}

impl std::fmt::Debug for InjectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constructor { params, .. } => f
                .debug_struct("Constructor")
                .field("params", params)
                .field("construct", &"<function>")
                .finish(),
            Self::Fields { fields, .. } => f
                .debug_struct("Fields")
                .field("construct", &"<function>")
                .field("fields", fields)
                .finish(),
        }
    }
}

/// 组件描述符
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// 组件名称（解析键）
    pub name: String,
    /// 组件类型信息
    pub type_info: TypeInfo,
    /// 注入策略
    pub strategy: InjectionStrategy,
}

impl ComponentDescriptor {
    /// 创建描述符构建器
    pub fn builder<T: 'static>(name: impl Into<String>) -> ComponentDescriptorBuilder {
        ComponentDescriptorBuilder {
            name: name.into(),
            type_info: TypeInfo::of::<T>(),
            params: Vec::new(),
            construct: None,
            parameterless: None,
            fields: Vec::new(),
        }
    }

    /// 为实现 `Default` 的无依赖类型创建描述符
    pub fn from_default<T>(name: impl Into<String>) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            type_info: TypeInfo::of::<T>(),
            strategy: InjectionStrategy::Fields {
                construct: Arc::new(|| Ok(Box::new(T::default()) as BoxedComponent)),
                fields: Vec::new(),
            },
        }
    }

    /// 该组件的全部依赖边
    pub fn dependencies(&self) -> Vec<&TypeInfo> {
        match &self.strategy {
            InjectionStrategy::Constructor { params, .. } => params.iter().collect(),
            InjectionStrategy::Fields { fields, .. } => {
                fields.iter().map(|field| &field.target).collect()
            }
        }
    }
}

/// 组件描述符构建器
///
/// 显式注册路径：不经过宏时用它声明注入策略。
pub struct ComponentDescriptorBuilder {
    name: String,
    type_info: TypeInfo,
    params: Vec<TypeInfo>,
    construct: Option<ConstructFn>,
    parameterless: Option<ParameterlessFn>,
    fields: Vec<FieldInjection>,
}

impl ComponentDescriptorBuilder {
    /// 声明构造函数注入
    pub fn constructor<F>(mut self, params: Vec<TypeInfo>, construct: F) -> Self
    where
        F: Fn(Vec<BoxedComponent>) -> Result<BoxedComponent, BoxedError> + Send + Sync + 'static,
    {
        self.params = params;
        self.construct = Some(Arc::new(construct));
        self
    }

    /// 声明无参构造
    pub fn parameterless<F>(mut self, construct: F) -> Self
    where
        F: Fn() -> Result<BoxedComponent, BoxedError> + Send + Sync + 'static,
    {
        self.parameterless = Some(Arc::new(construct));
        self
    }

    /// 添加注入字段
    pub fn inject_field<F>(mut self, field_name: &'static str, target: TypeInfo, assign: F) -> Self
    where
        F: Fn(&mut BoxedComponent, BoxedComponent) -> Result<(), BoxedError> + Send + Sync + 'static,
    {
        self.fields.push(FieldInjection {
            field_name,
            target,
            assign: Arc::new(assign),
        });
        self
    }

    /// 构建描述符
    ///
    /// 构造函数注入与字段注入互斥；两者都缺失时必须提供无参构造。
    pub fn build(self) -> Result<ComponentDescriptor, ComponentError> {
        let strategy = match (self.construct, self.parameterless) {
            (Some(_), _) if !self.fields.is_empty() => {
                return Err(ComponentError::ConflictingStrategies {
                    type_name: self.type_info.type_path,
                });
            }
            (Some(construct), _) => InjectionStrategy::Constructor {
                params: self.params,
                construct,
            },
            (None, Some(construct)) => InjectionStrategy::Fields {
                construct,
                fields: self.fields,
            },
            (None, None) => {
                return Err(ComponentError::RegistrationError {
                    type_name: self.type_info.type_path,
                    message: "未声明任何构造方式".to_string(),
                });
            }
        };

        Ok(ComponentDescriptor {
            name: self.name,
            type_info: self.type_info,
            strategy,
        })
    }
}
