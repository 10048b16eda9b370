use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Expr, ExprLit, Field, Fields, FieldsNamed, Ident, ItemStruct, Lit, LitStr, Meta, Path, Token,
    parse_macro_input, parse_quote, punctuated::Punctuated,
};

/// Options accepted by `#[base_entity(...)]`.
///
/// `label` names the record in not-found messages. `owner` and `search` must
/// be given together: they mark the entity as owned by a user and name the
/// column used for case-insensitive search.
struct EntityOptions {
    traits: Path,
    label: String,
    owner: Option<LitStr>,
    search: Option<LitStr>,
}

impl Default for EntityOptions {
    fn default() -> Self {
        Self {
            traits: parse_quote!(crate::db::dao::base_traits),
            label: "Record".to_string(),
            owner: None,
            search: None,
        }
    }
}

#[proc_macro_attribute]
pub fn base_entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated<Meta, Token![,]>::parse_terminated);
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(err) => return err.to_compile_error().into(),
    };

    let mut input = parse_macro_input!(item as ItemStruct);
    let Fields::Named(fields) = &mut input.fields else {
        return syn::Error::new_spanned(&input, "base_entity requires a struct with named fields")
            .to_compile_error()
            .into();
    };

    prepend_base_fields(fields);

    let owned_impl = match owned_entity_impl(&options, fields) {
        Ok(tokens) => tokens,
        Err(err) => return err.to_compile_error().into(),
    };

    let traits = &options.traits;
    let label = &options.label;

    let expanded = quote! {
        #input

        impl #traits::HasIdActiveModel for ActiveModel {
            fn set_id(&mut self, id: uuid::Uuid) {
                self.id = sea_orm::ActiveValue::Set(id);
            }
        }

        impl #traits::TimestampedActiveModel for ActiveModel {
            fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone) {
                self.created_at = sea_orm::ActiveValue::Set(ts);
            }

            fn set_updated_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone) {
                self.updated_at = sea_orm::ActiveValue::Set(ts);
            }
        }

        impl #traits::HasBaseColumns for Entity {
            const LABEL: &'static str = #label;

            fn id_column() -> Column {
                Column::Id
            }

            fn created_at_column() -> Column {
                Column::CreatedAt
            }
        }

        #owned_impl
    };

    expanded.into()
}

fn prepend_base_fields(fields: &mut FieldsNamed) {
    let has = |name: &str| {
        fields
            .named
            .iter()
            .any(|field| field.ident.as_ref().is_some_and(|ident| ident == name))
    };

    let mut base: Vec<Field> = Vec::new();
    if !has("id") {
        base.push(parse_quote! {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: uuid::Uuid
        });
    }
    for name in ["created_at", "updated_at"] {
        if !has(name) {
            let ident = Ident::new(name, Span::call_site());
            base.push(parse_quote! {
                #[sea_orm(default_expr = "Expr::current_timestamp()")]
                pub #ident: sea_orm::entity::prelude::DateTimeWithTimeZone
            });
        }
    }

    let declared = std::mem::take(&mut fields.named);
    fields.named.extend(base);
    fields.named.extend(declared);
}

fn owned_entity_impl(
    options: &EntityOptions,
    fields: &FieldsNamed,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let (owner, search) = match (&options.owner, &options.search) {
        (None, None) => return Ok(quote! {}),
        (Some(owner), Some(search)) => (owner, search),
        (Some(lit), None) | (None, Some(lit)) => {
            return Err(syn::Error::new(
                lit.span(),
                "`owner` and `search` must be declared together",
            ));
        }
    };

    for lit in [owner, search] {
        let declared = fields
            .named
            .iter()
            .any(|field| field.ident.as_ref().is_some_and(|ident| *ident == lit.value()));
        if !declared {
            return Err(syn::Error::new(
                lit.span(),
                format!("no field named `{}` on this entity", lit.value()),
            ));
        }
    }

    let traits = &options.traits;
    let owner_variant = column_variant(owner);
    let search_variant = column_variant(search);

    Ok(quote! {
        impl #traits::OwnedEntity for Entity {
            fn owner_column() -> Column {
                Column::#owner_variant
            }

            fn search_column() -> Column {
                Column::#search_variant
            }
        }
    })
}

/// `user_id` -> `UserId`, matching the variants `DeriveEntityModel` emits.
fn column_variant(field: &LitStr) -> Ident {
    let pascal: String = field
        .value()
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    Ident::new(&pascal, field.span())
}

fn parse_options(args: Punctuated<Meta, Token![,]>) -> Result<EntityOptions, syn::Error> {
    let mut options = EntityOptions::default();

    for meta in args {
        let Meta::NameValue(pair) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected `key = \"value\"`, e.g. owner = \"user_id\"",
            ));
        };

        let Some(key) = pair.path.get_ident().map(ToString::to_string) else {
            return Err(syn::Error::new_spanned(pair.path, "expected a plain key"));
        };

        let value = match pair.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(value),
                ..
            }) => value,
            other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
        };

        match key.as_str() {
            "traits" => {
                options.traits = value.parse::<Path>().map_err(|err| {
                    syn::Error::new(value.span(), format!("invalid traits path: {err}"))
                })?;
            }
            "label" => options.label = value.value(),
            "owner" => options.owner = Some(value),
            "search" => options.search = Some(value),
            other => {
                return Err(syn::Error::new(
                    value.span(),
                    format!("unknown base_entity option `{other}`"),
                ));
            }
        }
    }

    Ok(options)
}
