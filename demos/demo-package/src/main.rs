//! # 组件解析演示
//!
//! 演示 autowire 容器的完整流程：
//! - 使用 `#[component]` / `#[autowired]` 标记组件
//! - 按模块前缀加载注册表
//! - 递归解析构造函数注入与字段注入的组件图

use anyhow::Result;
use autowire_abstractions::ComponentRegistry;
use autowire_impl::{Registry, Resolver};
use tracing::info;

/// 数据访问层组件
mod repositories {
    use component_macros::component;

    /// 用户数据访问
    #[component(name = "user_repository")]
    #[derive(Debug, Default)]
    pub struct UserRepository;

    impl UserRepository {
        pub fn find_username(&self, id: u64) -> String {
            format!("user-{id}")
        }
    }
}

/// 业务服务层组件
mod services {
    use super::repositories::UserRepository;
    use component_macros::{autowired, component};

    /// 审计日志，字段注入示例
    #[component(name = "audit_log")]
    #[derive(Debug, Default)]
    pub struct AuditLog {
        #[autowired]
        repository: UserRepository,
        entries: Vec<String>,
    }

    impl AuditLog {
        pub fn record(&mut self, id: u64) {
            let username = self.repository.find_username(id);
            self.entries.push(username);
        }

        pub fn entries(&self) -> &[String] {
            &self.entries
        }
    }

    /// 用户服务，构造函数注入示例
    #[component(name = "user_service", constructor)]
    #[derive(Debug)]
    pub struct UserService {
        repository: UserRepository,
    }

    #[autowired]
    impl UserService {
        pub fn new(repository: UserRepository) -> Self {
            Self { repository }
        }

        pub fn greet(&self, id: u64) -> String {
            format!("你好, {}", self.repository.find_username(id))
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt().init();

    info!("启动组件解析演示");

    // 加载本 crate 下的全部组件
    let registry = Registry::load("demo_package")?;
    info!("注册表加载完成: {} 个组件", registry.len());
    for name in registry.component_names() {
        info!("  - {}", name);
    }

    if let Err(errors) = registry.validate() {
        for error in &errors {
            tracing::warn!("注册表校验问题: {}", error);
        }
    }

    let resolver = Resolver::new(registry);

    // 构造函数注入
    let service: services::UserService = resolver.resolve_as("user_service")?;
    info!("{}", service.greet(42));

    // 字段注入
    let mut audit: services::AuditLog = resolver.resolve_as("audit_log")?;
    audit.record(42);
    info!("审计记录: {:?}", audit.entries());

    // 每次解析都是全新实例
    let another: services::UserService = resolver.resolve_as("user_service")?;
    info!("再次解析: {}", another.greet(7));

    info!("演示结束");
    Ok(())
}
