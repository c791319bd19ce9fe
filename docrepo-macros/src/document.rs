use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Result, Type};

/// Options read from `#[document(...)]` on the struct.
#[derive(Default)]
struct DocumentOptions {
    collection: Option<LitStr>,
    id: Option<LitStr>,
}

fn parse_struct_options(ast: &DeriveInput) -> Result<DocumentOptions> {
    let mut options = DocumentOptions::default();

    for attr in ast.attrs.iter().filter(|attr| attr.path().is_ident("document")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                if options.collection.is_some() {
                    return Err(meta.error("duplicate `collection` option"));
                }
                let name: LitStr = meta.value()?.parse()?;
                if name.value().is_empty() {
                    return Err(syn::Error::new_spanned(name, "collection name must not be empty"));
                }
                options.collection = Some(name);
                Ok(())
            } else if meta.path.is_ident("id") {
                if options.id.is_some() {
                    return Err(meta.error("duplicate `id` option"));
                }
                options.id = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown document option, expected `collection` or `id`"))
            }
        })?;
    }

    Ok(options)
}

fn is_marked_id(field: &syn::Field) -> Result<bool> {
    let mut marked = false;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("document")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                marked = true;
                Ok(())
            } else {
                Err(meta.error("unknown field option, expected `id`"))
            }
        })?;
    }

    Ok(marked)
}

/// Picks the key field: `#[document(id)]` on a field, then `#[document(id = "...")]` on the
/// struct, then a field named `id`.
fn find_id_field<'a>(
    ast: &'a DeriveInput,
    options: &DocumentOptions,
) -> Result<(&'a Ident, &'a Type)> {
    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    ast,
                    "Document can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ast,
                "Document can only be derived for structs",
            ));
        }
    };

    let mut marked = Vec::new();
    for field in fields {
        if is_marked_id(field)? {
            marked.push(field);
        }
    }

    if marked.len() > 1 {
        return Err(syn::Error::new_spanned(
            marked[1],
            "only one field can be marked with #[document(id)]",
        ));
    }

    let wanted = options.id.as_ref().map(LitStr::value);
    let field = match (marked.first(), &wanted) {
        (Some(field), None) => Some(*field),
        (Some(_), Some(_)) => {
            return Err(syn::Error::new_spanned(
                ast,
                "use either #[document(id = \"...\")] on the struct or #[document(id)] on a field",
            ));
        }
        (None, Some(name)) => fields
            .iter()
            .find(|f| f.ident.as_ref().is_some_and(|ident| ident == name)),
        (None, None) => fields
            .iter()
            .find(|f| f.ident.as_ref().is_some_and(|ident| ident == "id")),
    };

    match (field, wanted) {
        (Some(field), _) => match &field.ident {
            Some(ident) => Ok((ident, &field.ty)),
            None => Err(syn::Error::new_spanned(field, "key field must be named")),
        },
        (None, Some(name)) => Err(syn::Error::new_spanned(
            ast,
            format!("Field {} not found in struct", name),
        )),
        (None, None) => Err(syn::Error::new_spanned(
            ast,
            "a document needs an `id` field, a #[document(id)] field or #[document(id = \"...\")]",
        )),
    }
}

pub(crate) fn generate_document(ast: &DeriveInput) -> Result<TokenStream> {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let options = parse_struct_options(ast)?;
    let (id_ident, id_type) = find_id_field(ast, &options)?;
    let type_name = LitStr::new(&name.to_string(), name.span());

    let collection_name_code = options.collection.map(|collection| {
        quote! {
            fn collection_name() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(#collection)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::docrepo::document::Document for #name #ty_generics #where_clause {
            type Key = #id_type;

            fn id(&self) -> &Self::Key {
                &self.#id_ident
            }

            fn type_name() -> &'static str {
                #type_name
            }

            #collection_name_code
        }
    })
}
