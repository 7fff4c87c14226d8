//! Internationalization (i18n) for the dashboard UI.
//!
//! # Architecture
//!
//! - `registry`: supported languages and their metadata (Chinese is the default)
//! - `language`: validated `Language` type
//! - `strings`: per-language string tables
//! - `store`: immutable lookup tables and `{param}` substitution
//! - `controller`: current language, persisted preference, document sync
//!
//! # Example
//!
//! ```rust,ignore
//! use monitor_dashboard::i18n::{lookup, Language, TranslationStore};
//!
//! let table = TranslationStore::load(Language::ENGLISH);
//! let text = lookup(table, "host.count", &[("count", 3)]);
//! assert_eq!(text, "Hosts: 3");
//! ```

mod controller;
mod language;
mod registry;
mod store;
mod strings;

pub use controller::{LanguageChanged, LanguageController};
pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use store::{lookup, lookup_plain, TranslationStore, TranslationTable};
