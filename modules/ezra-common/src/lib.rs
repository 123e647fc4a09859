pub mod config;
pub mod error;
pub mod palette;
pub mod types;

pub use config::{Config, DataLocation, MapConfig};
pub use error::EzraError;
pub use palette::{phase_color, CategoryStyle, MarkerIcon, Palette};
pub use types::*;
