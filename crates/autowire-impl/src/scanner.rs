//! 编译期组件扫描器
//!
//! 宏注册的组件都在全局编译期注册表里，扫描就是按模块前缀过滤。

use async_trait::async_trait;
use autowire_abstractions::ComponentScanner;
use autowire_common::{registration, ComponentDescriptor, ComponentError};
use tracing::info;

/// 编译期注册表扫描器
///
/// 不做任何 I/O；`target` 是模块路径前缀。
#[derive(Debug, Default)]
pub struct CompileTimeScanner;

impl CompileTimeScanner {
    /// 创建新的扫描器
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ComponentScanner for CompileTimeScanner {
    async fn scan(&self, target: &str) -> Result<Vec<ComponentDescriptor>, ComponentError> {
        if !self.supports(target) {
            return Err(ComponentError::ScanError {
                message: format!("不支持的扫描目标: {target:?}"),
            });
        }
        let descriptors = registration::descriptors_in_module(target);
        info!("扫描目标 {} 完成，发现 {} 个组件", target, descriptors.len());
        Ok(descriptors)
    }

    fn name(&self) -> &str {
        "CompileTimeScanner"
    }

    fn supports(&self, target: &str) -> bool {
        !target.is_empty() && target.split("::").all(|segment| !segment.is_empty())
    }
}
