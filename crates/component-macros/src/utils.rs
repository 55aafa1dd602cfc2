//! 宏实现的公共工具

use proc_macro2::Span;
use syn::Ident;

/// 生成 `ctor` 注册函数的标识符
pub fn registration_ident(prefix: &str, target: &Ident) -> Ident {
    Ident::new(
        &format!("__register_{}_{}", prefix, target.to_string().to_lowercase()),
        Span::call_site(),
    )
}
