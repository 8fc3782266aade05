#![deny(unsafe_code)]

pub mod currency;
pub mod error;
pub mod hash;
pub mod paths;
pub mod reorder_rules;
pub mod settings;
pub mod template;
pub mod vocabulary;

pub use crate::currency::CurrencyMap;
pub use crate::error::StandardsError;
pub use crate::reorder_rules::ReorderRules;
pub use crate::settings::{
    CountrySettings, ExceptionSpec, NATIONAL_ACCOUNTS, RuleSpec, Settings, SignatureSpec,
};
pub use crate::template::{MappingTemplate, load_mapping_template};
pub use crate::vocabulary::{CURRENCY_TOKENS, DEFAULT_CURRENCY, UnitVocabulary};
