use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// First path segments accepted by the registry's dotted-path lookup.
const KNOWN_CATEGORIES: &[&str] = &[
    "colors",
    "colorScales",
    "fontFamily",
    "fontFamilies",
    "boxShadow",
    "shadows",
    "animation",
    "animations",
    "keyframes",
];

#[proc_macro_derive(TokenField, attributes(token))]
pub fn token_field_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let variants = if let Data::Enum(data_enum) = input.data {
        data_enum.variants
    } else {
        panic!("#[derive(TokenField)] can only be used on enums");
    };

    let mut variant_matches = Vec::with_capacity(variants.len());

    for variant in variants.iter() {
        if !matches!(variant.fields, Fields::Unit) {
            panic!("#[derive(TokenField)] variants can't carry fields");
        }

        let ident = &variant.ident;
        let path = match get_token_path(&variant.attrs) {
            Ok(path) => path,
            Err(error) => return error.to_compile_error().into(),
        };

        variant_matches.push(quote! {
            #name::#ident => #path,
        });
    }

    let expanded = quote! {
        impl #name {
            /// Dotted token path this variant refers to.
            pub const fn path(&self) -> &'static str {
                match self {
                    #(#variant_matches)*
                }
            }

            /// Looks the variant's path up in `registry`.
            pub fn resolve<'a>(
                &self,
                registry: &'a ::tesserae_tokens::registry::TokenRegistry,
            ) -> ::core::result::Result<
                ::tesserae_tokens::registry::TokenValue<'a>,
                ::tesserae_tokens::registry::NotFoundError,
            > {
                registry.lookup(self.path())
            }
        }
    };

    TokenStream::from(expanded)
}

fn get_token_path(attrs: &[Attribute]) -> syn::Result<LitStr> {
    let token_attr = attrs
        .iter()
        .find(|attr| attr.path().is_ident("token"))
        .expect("Variant is missing #[token(\"...\")] attribute");

    let path: LitStr = token_attr.parse_args()?;
    let value = path.value();
    let mut segments = value.split('.');

    // `split` always yields at least one item.
    let category = segments.next().unwrap_or_default();
    if !KNOWN_CATEGORIES.contains(&category) {
        return Err(syn::Error::new_spanned(
            &path,
            format!("unknown token category `{category}`, expected one of {KNOWN_CATEGORIES:?}"),
        ));
    }

    let rest: Vec<&str> = segments.collect();
    if rest.is_empty() || rest.iter().any(|segment| segment.is_empty()) {
        return Err(syn::Error::new_spanned(
            &path,
            "token path needs a non-empty name after the category, like `colors.primary.500`",
        ));
    }

    Ok(path)
}
