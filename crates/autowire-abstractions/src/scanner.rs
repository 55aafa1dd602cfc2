//! 组件扫描器抽象接口
//!
//! 扫描是容器的构建期边界：向注册表交付一批组件描述符。

use async_trait::async_trait;
use autowire_common::{ComponentDescriptor, ComponentError};

/// 组件扫描器 trait
///
/// `target` 是模块路径前缀，例如 `my_app::services`。
#[async_trait]
pub trait ComponentScanner: Send + Sync {
    /// 扫描指定目标中的组件
    async fn scan(&self, target: &str) -> Result<Vec<ComponentDescriptor>, ComponentError>;

    /// 获取扫描器名称
    fn name(&self) -> &str;

    /// 检查是否支持指定的扫描目标
    fn supports(&self, target: &str) -> bool;
}
