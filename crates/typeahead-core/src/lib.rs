pub mod config;
pub mod error;
pub mod highlight;
pub mod registry;
pub mod suggestion;

pub use config::TypeaheadConfig;
pub use error::{Result, TypeaheadError};
pub use highlight::{highlight, Markup};
pub use registry::FieldRegistry;
pub use suggestion::{DropdownEntry, EntryIcon, FieldId, SuggestionSet};
