use proc_macro::TokenStream;
use quote::quote;
use syn::{self, Data, DeriveInput, Field, Fields};

/// Derives `IdentifiableDocument` for a struct with exactly one field marked `#[id]`.
#[proc_macro_derive(IdentifiableDocument, attributes(id))]
pub fn identifiable_document_macro_derive(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);
    match impl_identifiable_document_macro(&ast) {
        Ok(gen) => gen,
        Err(err) => err.to_compile_error().into()
    }
}

fn impl_identifiable_document_macro(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let data_struct = match &ast.data {
        Data::Struct(data_struct) => data_struct,
        _ => return Err(syn::Error::new_spanned(ast, "IdentifiableDocument can only be derived for structs"))
    };
    let named_fields = match &data_struct.fields {
        Fields::Named(fields_named) => fields_named,
        _ => return Err(syn::Error::new_spanned(ast, "IdentifiableDocument requires named fields"))
    };

    let id_fields : Vec<&Field> = named_fields.named.iter()
        .filter(|field| field.attrs.iter().any(|attr| attr.path.is_ident("id")))
        .collect();
    let id_field = match id_fields.as_slice() {
        [field] => *field,
        [] => return Err(syn::Error::new_spanned(ast, "missing #[id] field")),
        _ => return Err(syn::Error::new_spanned(ast, "only one field may be marked #[id]"))
    };

    let id_ident = &id_field.ident;
    let gen = quote! {
        impl IdentifiableDocument for #name {
            fn get_id_value(&self) -> String {
                self.#id_ident.clone()
            }
        }
    };
    Ok(gen.into())
}
