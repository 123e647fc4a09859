pub mod error;
pub mod filter;
pub mod insights;
pub mod loader;
pub mod normalize;
pub mod source;
pub mod store;

pub use error::{DataError, Result};
pub use filter::{CategoryFilter, ProjectQuery, Selection};
pub use loader::{CsvLoader, DataPaths, LoadedProjects};
pub use normalize::ConfidentialIds;
pub use source::{source_for, CsvSource, DirSource, HttpSource, StaticSource};
pub use store::{LoadStatus, ProjectsStore, StoreSnapshot};
