use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, parse_macro_input};

fn collection_name(attrs: &[Attribute]) -> Option<String> {
    let meta = attrs
        .iter()
        .find(|attr| attr.path.is_ident("document"))?
        .parse_meta()
        .ok()?;

    let syn::Meta::List(meta_list) = meta else {
        return None;
    };

    meta_list.nested.into_iter().find_map(|nested_meta| {
        let syn::NestedMeta::Meta(syn::Meta::NameValue(name_value)) =
            nested_meta
        else {
            return None;
        };

        if !name_value.path.is_ident("collection") {
            return None;
        }

        let syn::Lit::Str(lit_str) = name_value.lit else {
            return None;
        };

        Some(lit_str.value())
    })
}

/// Generates collection helpers for a mongo document struct.
///
/// Every helper takes the database handle explicitly; nothing here reaches
/// for a global client.
#[proc_macro_derive(Document, attributes(document))]
pub fn document_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let Some(collection_name) = collection_name(&input.attrs) else {
        return TokenStream::from(quote! {compile_error!(
                "The #[derive(Document)] macro requires a \
                #[document(collection = \"...\")] attribute."
        )});
    };

    TokenStream::from(quote! {
        impl #name {
            pub fn collection(
                db: &mongodb::Database
            ) -> mongodb::Collection<#name> {
                db.collection::<#name>(#collection_name)
            }

            pub async fn find_one(
                db: &mongodb::Database,
                query: mongodb::bson::Document
            ) -> Result<Option<#name>, mongodb::error::Error>
            where #name: serde::de::DeserializeOwned + Send + Sync {
                Self::collection(db).find_one(query).await
            }

            pub async fn find(
                db: &mongodb::Database,
                query: mongodb::bson::Document
            ) -> Result<Vec<#name>, mongodb::error::Error>
            where #name: serde::de::DeserializeOwned + Send + Sync {
                use futures::TryStreamExt;

                // ! options (projection, sort, etc.) are not exposed
                // ! since you can't use the builder in the macro
                Self::collection(db).find(query).await?.try_collect().await
            }

            pub async fn insert_one(
                db: &mongodb::Database,
                document: &#name
            ) -> Result<mongodb::results::InsertOneResult, mongodb::error::Error>
            where #name: serde::Serialize + Send + Sync {
                Self::collection(db).insert_one(document).await
            }

            pub async fn update_one(
                db: &mongodb::Database,
                query: mongodb::bson::Document,
                update: mongodb::bson::Document
            ) -> Result<mongodb::results::UpdateResult, mongodb::error::Error> {
                Self::collection(db).update_one(query, update).await
            }

            pub async fn update_many(
                db: &mongodb::Database,
                query: mongodb::bson::Document,
                update: mongodb::bson::Document
            ) -> Result<mongodb::results::UpdateResult, mongodb::error::Error> {
                Self::collection(db).update_many(query, update).await
            }

            pub async fn delete_one(
                db: &mongodb::Database,
                query: mongodb::bson::Document
            ) -> Result<mongodb::results::DeleteResult, mongodb::error::Error> {
                Self::collection(db).delete_one(query).await
            }
        }
    })
}
