//! # Component Macros
//!
//! 这个 crate 提供编译期组件注册的过程宏。
//!
//! ## 核心宏
//!
//! - [`macro@component`] - 组件标记宏
//! - [`macro@autowired`] - 注入构造函数标记宏
//!
//! 宏展开引用使用方 crate 的 `autowire_common` 与 `ctor` 依赖，
//! 两者都需要出现在使用方的 Cargo.toml 中。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{autowired, component};
//!
//! #[component(name = "user_repository")]
//! #[derive(Debug, Default)]
//! pub struct UserRepository;
//!
//! #[component(name = "user_service", constructor)]
//! #[derive(Debug)]
//! pub struct UserService {
//!     repository: UserRepository,
//! }
//!
//! #[autowired]
//! impl UserService {
//!     pub fn new(repository: UserRepository) -> Self {
//!         Self { repository }
//!     }
//! }
//! ```

use proc_macro::TokenStream;

mod autowired;
mod component;
mod utils;

/// 组件标记宏
///
/// 为结构体实现 `Component` trait，并在程序启动时（`ctor`）向
/// 全局编译期注册表写入组件描述符。
///
/// # 参数
///
/// - `name = "custom_name"` - 自定义组件名称（默认为结构体名）
/// - `constructor` - 声明构造路径由 `#[autowired]` impl 块提供；
///   与 `#[autowired]` 字段互斥
///
/// 未声明 `constructor` 时组件按字段注入处理：结构体必须实现
/// `Default`，带 `#[autowired]` 标记的字段在无参构造之后逐个注入。
/// 宏要写在 `#[derive(...)]` 之前，字段标记才能在派生展开前摘除。
///
/// # 示例
///
/// ```rust,ignore
/// #[component(name = "report_service")]
/// #[derive(Debug, Default)]
/// pub struct ReportService {
///     #[autowired]
///     repository: ReportRepository,
/// }
/// ```
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(args, input)
}

/// 注入构造函数标记宏
///
/// 作用于固有 impl 块，选取其中的注入构造函数（名为 `new` 的
/// 函数，或块中唯一的函数），按参数声明顺序记录依赖并注册
/// 构造函数绑定。加载时构造函数注入优先于字段注入。
///
/// 构造函数必须按值接收参数并返回 `Self`。
///
/// # 示例
///
/// ```rust,ignore
/// #[autowired]
/// impl OrderService {
///     pub fn new(repository: OrderRepository, clock: Clock) -> Self {
///         Self { repository, clock }
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn autowired(args: TokenStream, input: TokenStream) -> TokenStream {
    autowired::autowired_impl(args, input)
}
