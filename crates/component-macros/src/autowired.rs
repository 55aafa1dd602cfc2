//! `#[autowired]` 宏实现
//!
//! 作用于固有 impl 块，注册注入构造函数绑定。

use crate::utils::registration_ident;
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, Type};

/// 实现 #[autowired] 宏
pub fn autowired_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new(Span::call_site(), "autowired 不接受参数")
            .to_compile_error()
            .into();
    }

    let input_impl = syn::parse_macro_input!(input as ItemImpl);

    if input_impl.trait_.is_some() {
        return syn::Error::new_spanned(&input_impl, "autowired 只能用于固有 impl 块")
            .to_compile_error()
            .into();
    }
    if !input_impl.generics.params.is_empty() {
        return syn::Error::new_spanned(&input_impl.generics, "组件不支持泛型参数")
            .to_compile_error()
            .into();
    }

    let self_ty = (*input_impl.self_ty).clone();
    let type_ident = match type_ident_of(&self_ty) {
        Ok(ident) => ident,
        Err(error) => return error.to_compile_error().into(),
    };

    let constructor = match select_constructor(&input_impl) {
        Ok(function) => function.clone(),
        Err(error) => return error.to_compile_error().into(),
    };

    let mut param_types: Vec<Type> = Vec::new();
    for input in &constructor.sig.inputs {
        match input {
            FnArg::Receiver(receiver) => {
                return syn::Error::new_spanned(receiver, "注入构造函数不能带接收者")
                    .to_compile_error()
                    .into();
            }
            FnArg::Typed(pat_type) => {
                if matches!(*pat_type.ty, Type::Reference(_)) {
                    return syn::Error::new_spanned(
                        &pat_type.ty,
                        "注入构造函数参数必须按值接收",
                    )
                    .to_compile_error()
                    .into();
                }
                param_types.push((*pat_type.ty).clone());
            }
        }
    }

    let fn_ident = &constructor.sig.ident;
    let param_count = param_types.len();
    let arg_idents: Vec<Ident> = (0..param_count)
        .map(|index| Ident::new(&format!("arg{index}"), Span::call_site()))
        .collect();

    let param_type_infos: Vec<proc_macro2::TokenStream> = param_types
        .iter()
        .map(|ty| quote! { autowire_common::TypeInfo::of::<#ty>() })
        .collect();

    let extractions: Vec<proc_macro2::TokenStream> = param_types
        .iter()
        .zip(&arg_idents)
        .map(|(ty, ident)| {
            quote! {
                let #ident = args.remove(0).downcast::<#ty>().map_err(|_| {
                    autowire_common::BoxedError::from(
                        concat!("构造参数类型不匹配: ", stringify!(#ty)),
                    )
                })?;
            }
        })
        .collect();

    let registration_fn_name = registration_ident("constructor", &type_ident);

    let expanded = quote! {
        #input_impl

        // 使用 ctor 在程序启动时注册注入构造函数绑定
        #[ctor::ctor]
        fn #registration_fn_name() {
            autowire_common::registration::register_constructor_binding(
                autowire_common::ConstructorBinding {
                    target: autowire_common::TypeInfo::of::<#self_ty>(),
                    params: vec![ #( #param_type_infos ),* ],
                    construct: ::std::sync::Arc::new(
                        |mut args: ::std::vec::Vec<autowire_common::BoxedComponent>|
                            -> ::std::result::Result<
                                autowire_common::BoxedComponent,
                                autowire_common::BoxedError,
                            > {
                            if args.len() != #param_count {
                                return Err(format!(
                                    "构造参数数量不匹配: 期望 {}, 实际 {}",
                                    #param_count,
                                    args.len(),
                                )
                                .into());
                            }
                            #(#extractions)*
                            Ok(Box::new(<#self_ty>::#fn_ident( #( *#arg_idents ),* ))
                                as autowire_common::BoxedComponent)
                        },
                    ),
                },
            );
        }
    };

    TokenStream::from(expanded)
}

/// 取出 impl 目标类型的标识符
fn type_ident_of(self_ty: &Type) -> syn::Result<Ident> {
    if let Type::Path(type_path) = self_ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.arguments.is_none() {
                return Ok(segment.ident.clone());
            }
        }
    }
    Err(syn::Error::new_spanned(
        self_ty,
        "autowired 只支持无泛型参数的具名类型",
    ))
}

/// 选取注入构造函数：名为 `new` 的函数，或块中唯一的函数
fn select_constructor(input_impl: &ItemImpl) -> syn::Result<&ImplItemFn> {
    let functions: Vec<&ImplItemFn> = input_impl
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(function) => Some(function),
            _ => None,
        })
        .collect();

    if let Some(function) = functions.iter().find(|f| f.sig.ident == "new").copied() {
        return Ok(function);
    }
    match functions.as_slice() {
        [single] => Ok(*single),
        _ => Err(syn::Error::new_spanned(
            input_impl,
            "无法确定注入构造函数: 需要名为 new 的函数或块中唯一的函数",
        )),
    }
}
