//! # Autowire Impl
//!
//! 容器的具体实现：不可变注册表与递归解析器。
//!
//! ## 基本使用
//!
//! ```rust,ignore
//! use autowire_impl::{Registry, Resolver};
//!
//! let registry = Registry::load("my_app::services")?;
//! let resolver = Resolver::new(registry);
//! let service: UserService = resolver.resolve_as("user_service")?;
//! ```

pub mod registry;
pub mod resolver;
pub mod scanner;

pub use registry::{Registry, RegistryBuilder};
pub use resolver::Resolver;
pub use scanner::CompileTimeScanner;
