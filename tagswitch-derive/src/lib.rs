use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Path, parse_macro_input, spanned::Spanned};

/// Arguments of the `#[variant(...)]` attribute.
struct VariantArgs {
    pub discriminant: Option<Path>,
}

impl VariantArgs {
    fn from_attributes(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut discriminant = None;

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("variant")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("discriminant") {
                    discriminant = Some(meta.value()?.parse::<Path>()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported variant attribute, expected `discriminant`"))
                }
            })?;
        }

        Ok(VariantArgs { discriminant })
    }
}

/// Implement `tagswitch::Variant` for an enum.
///
/// Without arguments every variant must be a unit variant and the enum is its own
/// discriminant. With `#[variant(discriminant = Kind)]`, each variant maps to the
/// member of `Kind` with the same name, and the build fails unless both enums list
/// exactly the same names.
#[proc_macro_derive(Variant, attributes(variant))]
pub fn derive_variant(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_variant(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_variant(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "`Variant` can only be derived for enums",
        ));
    };

    let args = VariantArgs::from_attributes(&input.attrs)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let idents: Vec<_> = data.variants.iter().map(|variant| &variant.ident).collect();

    let Some(kind) = args.discriminant else {
        // The enum tags itself: it must not carry any payload.
        if let Some(variant) = data
            .variants
            .iter()
            .find(|variant| !matches!(variant.fields, Fields::Unit))
        {
            return Err(syn::Error::new(
                variant.span(),
                "variant carries a payload; name a fieldless kind with `#[variant(discriminant = ...)]`",
            ));
        }

        return Ok(quote! {
            impl #impl_generics ::tagswitch::Variant for #name #ty_generics #where_clause {
                type Discriminant = Self;

                #[inline]
                fn discriminant(&self) -> Self::Discriminant {
                    *self
                }
            }
        });
    };

    // Generate one arm per variant, mapping it to the kind of the same name. The
    // const block below matches on the kind with one arm per variant as well, so a
    // kind member that no variant uses is rejected as a non-exhaustive match.
    let arms = idents.iter().map(|ident| {
        quote! { Self::#ident { .. } => #kind::#ident, }
    });
    let kind_arms = idents.iter().map(|ident| {
        quote! { #kind::#ident => (), }
    });

    Ok(quote! {
        impl #impl_generics ::tagswitch::Variant for #name #ty_generics #where_clause {
            type Discriminant = #kind;

            #[inline]
            fn discriminant(&self) -> Self::Discriminant {
                match self {
                    #(#arms)*
                }
            }
        }

        const _: () = {
            #[allow(dead_code)]
            fn kind_covers_variants(kind: #kind) {
                match kind {
                    #(#kind_arms)*
                }
            }
        };
    })
}
