//! 组件注册表抽象接口
//!
//! 注册表在加载阶段一次性建成，之后只读，因此接口只有查询面。

use autowire_common::ComponentDescriptor;
use std::any::TypeId;

/// 组件注册表 trait
///
/// 提供名称到描述符的只读查询。
pub trait ComponentRegistry: Send + Sync {
    /// 按名称查找描述符
    fn descriptor(&self, name: &str) -> Option<&ComponentDescriptor>;

    /// 名称是否已注册
    fn contains(&self, name: &str) -> bool {
        self.descriptor(name).is_some()
    }

    /// 按类型反查组件名称
    fn name_of_type(&self, type_id: TypeId) -> Option<&str>;

    /// 所有已注册的组件名称
    fn component_names(&self) -> Vec<&str>;

    /// 已注册组件数量
    fn len(&self) -> usize;

    /// 注册表是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
