//! 组件解析器抽象接口
//!
//! 解析是同步的递归树遍历，没有挂起点；[`ResolveContext`] 记录
//! 当前解析链，用于错误上下文和循环依赖拒绝。

use autowire_common::{BoxedComponent, ResolveError, ResolveResult};

/// 组件解析器 trait
///
/// 按名称产出依赖已全部满足的新实例。
pub trait ComponentResolver: Send + Sync {
    /// 解析指定名称的组件
    ///
    /// 每次调用都创建全新实例，实例所有权归调用方。
    fn resolve(&self, name: &str) -> ResolveResult<BoxedComponent>;

    /// 检查是否可以解析指定名称的组件
    fn can_resolve(&self, name: &str) -> bool;
}

/// 解析上下文
///
/// 当前解析链，自顶向下排列。
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    chain: Vec<String>,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 进入一个组件的解析
    ///
    /// 名称已在链上时拒绝，返回 [`ResolveError::CircularDependency`]。
    pub fn enter(&mut self, name: &str) -> ResolveResult<()> {
        if self.chain.iter().any(|entry| entry == name) {
            let mut cycle = self.chain.clone();
            cycle.push(name.to_string());
            return Err(ResolveError::CircularDependency {
                chain: cycle.join(" -> "),
            });
        }
        self.chain.push(name.to_string());
        Ok(())
    }

    /// 离开当前组件的解析
    pub fn leave(&mut self) {
        self.chain.pop();
    }

    /// 当前解析链
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// 解析链的显示形式，用于错误信息
    pub fn chain_display(&self) -> String {
        self.chain.join(" -> ")
    }
}
