use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive runtime attribute binding for a struct of attribute values.
///
/// Every named field becomes an attribute addressable by a string key, the
/// way a UI description sets properties by name. The key defaults to the
/// camelCase field name. Field types must implement
/// `floatlabel::description::AttributeValue`.
///
/// # Attributes on fields
/// - `#[inspectable(key = "placeholderColor")]` - Use an explicit key
/// - `#[inspectable(skip)]` - Not addressable by key
///
/// # Example
/// ```ignore
/// #[derive(Default, Inspectable)]
/// struct Attributes {
///     placeholder: Option<String>,
///     #[inspectable(key = "underline")]
///     underline_enabled: Option<bool>,
/// }
///
/// let mut attrs = Attributes::default();
/// attrs.set_attribute("underline", "false")?;
/// assert_eq!(attrs.attribute("underline").as_deref(), Some("false"));
/// ```
#[proc_macro_derive(Inspectable, attributes(inspectable))]
pub fn derive_inspectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_inspectable(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct AttributeField {
    name: syn::Ident,
    key: String,
}

fn expand_inspectable(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "Inspectable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "Inspectable can only be derived for structs",
            ))
        }
    };

    let mut attribute_fields = Vec::new();
    for field in fields {
        let Some(name) = field.ident.clone() else {
            continue;
        };

        let mut key: Option<String> = None;
        let mut skip = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("inspectable")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    let value: LitStr = meta.value()?.parse()?;
                    key = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `key = \"...\"` or `skip`"))
                }
            })?;
        }

        if skip {
            continue;
        }

        let key = key.unwrap_or_else(|| to_camel_case(&name.to_string()));
        if attribute_fields.iter().any(|f: &AttributeField| f.key == key) {
            return Err(syn::Error::new_spanned(
                &name,
                format!("duplicate inspectable key {key:?}"),
            ));
        }
        attribute_fields.push(AttributeField { name, key });
    }

    let keys = attribute_fields.iter().map(|f| &f.key);

    let setters = attribute_fields.iter().map(|field| {
        let name = &field.name;
        let key = &field.key;
        quote! {
            #key => {
                self.#name = ::floatlabel::description::AttributeValue::parse_attribute(value)
                    .map_err(|reason| ::floatlabel::description::DescriptionError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        reason,
                    })?;
                Ok(())
            }
        }
    });

    let getters = attribute_fields.iter().map(|field| {
        let name = &field.name;
        let key = &field.key;
        quote! {
            #key => ::floatlabel::description::AttributeValue::format_attribute(&self.#name),
        }
    });

    Ok(quote! {
        impl #impl_generics ::floatlabel::description::Inspectable for #struct_name #ty_generics #where_clause {
            fn attribute_keys() -> &'static [&'static str] {
                &[#(#keys),*]
            }

            fn set_attribute(
                &mut self,
                key: &str,
                value: &str,
            ) -> ::std::result::Result<(), ::floatlabel::description::DescriptionError> {
                match key {
                    #(#setters)*
                    _ => Err(::floatlabel::description::DescriptionError::UnknownAttribute(
                        key.to_string(),
                    )),
                }
            }

            fn attribute(&self, key: &str) -> ::std::option::Option<::std::string::String> {
                match key {
                    #(#getters)*
                    _ => None,
                }
            }
        }
    })
}

fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut upper_next = false;

    for c in s.chars() {
        if c == '_' {
            upper_next = !result.is_empty();
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}
