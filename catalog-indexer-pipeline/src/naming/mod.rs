//! Field naming between the storage domain and the search document.

mod field_names;

pub use field_names::{
    localized_prefix, FieldNameTable, FieldNameTranslator, DEFAULT_PRICE_FIELD,
    DEFAULT_PRICE_TYPE, LIST_PRICE_FIELD, LIST_PRICE_TYPE,
};
