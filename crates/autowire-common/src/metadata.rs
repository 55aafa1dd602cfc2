//! 类型元数据
//!
//! 依赖边与扫描过滤都基于这里的类型信息

use std::any::TypeId;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 短类型名称（不含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径，同时作为模块扫描的坐标
    pub type_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: 'static>() -> Self {
        let type_path = std::any::type_name::<T>().to_string();
        Self {
            name: type_path
                .split("::")
                .last()
                .unwrap_or("Unknown")
                .to_string(),
            id: TypeId::of::<T>(),
            type_path,
        }
    }

    /// 获取短类型名称
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 判断类型是否位于指定模块前缀之下
    ///
    /// 前缀按模块段对齐：`demo` 命中 `demo::services::Svc`，
    /// 不会命中 `demolition::X`。
    pub fn is_in_module(&self, prefix: &str) -> bool {
        match self.type_path.strip_prefix(prefix) {
            Some(rest) => rest.starts_with("::"),
            None => false,
        }
    }
}
