//! Dataset loading, schema validation, and label derivation
//!
//! Records are immutable once loaded; the only derived metadata is the label
//! column appended by [`DatasetSchema::derive_label`] and the split assignment
//! computed in [`crate::split`].

mod loader;
mod schema;
pub mod sample;

pub use loader::DataLoader;
pub use schema::DatasetSchema;
