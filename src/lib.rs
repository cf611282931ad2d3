pub mod dates;
pub mod export;
pub mod filters;
pub mod format;
pub mod grouping;
pub mod loader;
pub mod models;
pub mod render;
pub mod stats;
pub mod synthetic;
