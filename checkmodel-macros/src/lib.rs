use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr};

// 字段上的 #[check(...)] 参数
#[derive(Default)]
struct FieldArgs {
    rename: Option<String>,
    skip: bool,
}

// 结构体上的 #[check(...)] 参数
#[derive(Default)]
struct RecordArgs {
    field_enum: Option<Ident>,
}

fn parse_field_args(attrs: &[syn::Attribute]) -> syn::Result<FieldArgs> {
    let mut args = FieldArgs::default();
    for attr in attrs {
        if !attr.path().is_ident("check") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                args.rename = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                args.skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported check attribute, expected `rename` or `skip`"))
            }
        })?;
    }
    Ok(args)
}

fn parse_record_args(attrs: &[syn::Attribute]) -> syn::Result<RecordArgs> {
    let mut args = RecordArgs::default();
    for attr in attrs {
        if !attr.path().is_ident("check") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("field_enum") {
                let value: LitStr = meta.value()?.parse()?;
                args.field_enum = Some(value.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported check attribute, expected `field_enum`"))
            }
        })?;
    }
    Ok(args)
}

/// 将 snake_case 转换为 PascalCase
fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// 为结构体生成字段枚举 `<Name>Field`，并实现 `FieldKey` 和 `Record`
///
/// ```ignore
/// #[derive(Record)]
/// struct SignUp {
///     user_name: String,
///     #[check(rename = "pwd")]
///     password: String,
///     #[check(skip)]
///     remember_me: bool,
/// }
/// // => enum SignUpField { UserName, Password }
/// ```
#[proc_macro_derive(Record, attributes(check))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 每个未跳过的字段对应的 (变体名, 字段名)，变体名和字段名都不能重复
fn collect_keys<'a, I>(fields: I) -> syn::Result<Vec<(Ident, String)>>
where
    I: IntoIterator<Item = &'a syn::Field>,
{
    let mut keys: Vec<(Ident, String)> = Vec::new();
    for field in fields {
        let args = parse_field_args(&field.attrs)?;
        if args.skip {
            continue;
        }

        // named fields 一定有 ident
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let raw = ident.to_string();
        let raw = raw.trim_start_matches("r#");

        let variant = format_ident!("{}", to_pascal_case(raw), span = ident.span());
        let name = args.rename.unwrap_or_else(|| raw.to_string());

        if keys.iter().any(|(existing, _)| *existing == variant) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("field `{}` maps to variant `{}` which is already used", raw, variant),
            ));
        }
        if keys.iter().any(|(_, existing)| *existing == name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate field name `{}`", name),
            ));
        }
        keys.push((variant, name));
    }
    Ok(keys)
}

fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Record can only be derived for structs",
            ))
        }
    };

    let record_args = parse_record_args(&input.attrs)?;
    let enum_name = record_args
        .field_enum
        .unwrap_or_else(|| format_ident!("{}Field", name));

    let keys = collect_keys(fields)?;
    let variants: Vec<_> = keys.iter().map(|(variant, _)| variant).collect();
    let names: Vec<_> = keys.iter().map(|(_, name)| name).collect();

    if variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "Record requires at least one field that is not skipped",
        ));
    }

    let doc = format!("`{}` 的字段", name);
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #vis enum #enum_name {
            #(#variants),*
        }

        impl ::checkmodel::FieldKey for #enum_name {
            const ALL: &'static [Self] = &[#(Self::#variants),*];

            fn name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #names),*
                }
            }
        }

        impl ::std::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(::checkmodel::FieldKey::name(self))
            }
        }

        impl #impl_generics ::checkmodel::Record for #name #ty_generics #where_clause {
            type Field = #enum_name;
        }
    })
}
