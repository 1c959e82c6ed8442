pub mod catalog;
pub mod error;

pub use catalog::{DorkCatalog, DorkCategory, DorkTemplate, RenderedDork};
pub use error::CatalogError;
