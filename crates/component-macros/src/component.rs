//! `#[component]` 宏实现

use crate::utils::registration_ident;
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, Fields,
    Ident, ItemStruct, Lit, Meta, Result, Token, Type,
};

/// 组件标记参数
#[derive(Debug, Clone, Default)]
pub struct ComponentArgs {
    /// 自定义组件名称
    pub name: Option<String>,
    /// 构造路径由 `#[autowired]` impl 块提供
    pub constructor: bool,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ComponentArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) if path.is_ident("constructor") => {
                    args.constructor = true;
                }
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    if let Expr::Lit(expr_lit) = nv.value {
                        if let Lit::Str(lit_str) = expr_lit.lit {
                            args.name = Some(lit_str.value());
                        }
                    }
                }
                other => {
                    return Err(syn::Error::new_spanned(other, "无法识别的 component 参数"));
                }
            }
        }

        Ok(args)
    }
}

/// 实现 #[component] 宏
pub fn component_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let component_args = if args.is_empty() {
        ComponentArgs::default()
    } else {
        match syn::parse::<ComponentArgs>(args) {
            Ok(args) => args,
            Err(error) => return error.to_compile_error().into(),
        }
    };

    let mut input_struct = parse_macro_input!(input as ItemStruct);

    if !input_struct.generics.params.is_empty() {
        return syn::Error::new_spanned(&input_struct.generics, "组件不支持泛型参数")
            .to_compile_error()
            .into();
    }

    let struct_name = input_struct.ident.clone();
    let component_name = component_args
        .name
        .clone()
        .unwrap_or_else(|| struct_name.to_string());

    // 收集并摘除 #[autowired] 字段标记
    let injected_fields = match collect_injected_fields(&mut input_struct) {
        Ok(fields) => fields,
        Err(error) => return error.to_compile_error().into(),
    };

    if component_args.constructor && !injected_fields.is_empty() {
        return syn::Error::new_spanned(
            &struct_name,
            "构造函数注入与字段注入互斥: 去掉 constructor 参数或字段上的 #[autowired]",
        )
        .to_compile_error()
        .into();
    }

    let component_impl = quote! {
        impl autowire_common::Component for #struct_name {
            fn name(&self) -> &'static str {
                #component_name
            }
        }
    };

    let registration_code = generate_registration_code(
        &struct_name,
        &component_name,
        component_args.constructor,
        &injected_fields,
    );

    let expanded = quote! {
        #input_struct

        #component_impl

        #registration_code
    };

    TokenStream::from(expanded)
}

/// 收集带 #[autowired] 标记的具名字段
fn collect_injected_fields(input_struct: &mut ItemStruct) -> Result<Vec<(Ident, Type)>> {
    let mut injected = Vec::new();

    match &mut input_struct.fields {
        Fields::Named(fields) => {
            for field in fields.named.iter_mut() {
                let before = field.attrs.len();
                field.attrs.retain(|attr| !attr.path().is_ident("autowired"));
                if field.attrs.len() != before {
                    let ident = field
                        .ident
                        .clone()
                        .ok_or_else(|| syn::Error::new_spanned(&field.ty, "字段缺少名称"))?;
                    injected.push((ident, field.ty.clone()));
                }
            }
        }
        Fields::Unnamed(fields) => {
            for field in &fields.unnamed {
                if field.attrs.iter().any(|attr| attr.path().is_ident("autowired")) {
                    return Err(syn::Error::new_spanned(
                        field,
                        "#[autowired] 只能用于具名字段",
                    ));
                }
            }
        }
        Fields::Unit => {}
    }

    Ok(injected)
}

/// 生成组件描述符的注册代码
fn generate_registration_code(
    struct_name: &Ident,
    component_name: &str,
    constructor_expected: bool,
    injected_fields: &[(Ident, Type)],
) -> proc_macro2::TokenStream {
    let registration_fn_name = registration_ident("component", struct_name);

    // 无参构造：constructor 声明时留一个占位，真正的构造函数绑定
    // 由 #[autowired] impl 块注册，加载时覆盖这里的策略
    let parameterless = if constructor_expected {
        quote! {
            builder = builder.parameterless(|| {
                Err(autowire_common::BoxedError::from(
                    concat!("组件未注册注入构造函数: ", stringify!(#struct_name)),
                ))
            });
        }
    } else {
        quote! {
            builder = builder.parameterless(|| {
                Ok(Box::new(<#struct_name as ::std::default::Default>::default())
                    as autowire_common::BoxedComponent)
            });
        }
    };

    let field_registrations = injected_fields.iter().map(|(ident, ty)| {
        let field_name = ident.to_string();
        quote! {
            builder = builder.inject_field(
                #field_name,
                autowire_common::TypeInfo::of::<#ty>(),
                |instance, value| {
                    let instance = instance
                        .as_mut()
                        .downcast_mut::<#struct_name>()
                        .ok_or_else(|| autowire_common::BoxedError::from(
                            concat!("宿主类型不匹配: ", stringify!(#struct_name)),
                        ))?;
                    let value = value.downcast::<#ty>().map_err(|_| {
                        autowire_common::BoxedError::from(
                            concat!("字段类型不匹配: ", stringify!(#ident)),
                        )
                    })?;
                    instance.#ident = *value;
                    Ok(())
                },
            );
        }
    });

    quote! {
        // 使用 ctor 在程序启动时自动注册组件
        #[ctor::ctor]
        fn #registration_fn_name() {
            let mut builder =
                autowire_common::ComponentDescriptor::builder::<#struct_name>(#component_name);
            #parameterless
            #(#field_registrations)*
            match builder.build() {
                Ok(descriptor) => {
                    autowire_common::registration::register_component_descriptor(descriptor);
                }
                Err(error) => {
                    eprintln!("组件注册失败: {}: {}", #component_name, error);
                }
            }
        }
    }
}
