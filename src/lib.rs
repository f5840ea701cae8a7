pub mod atlas_dump;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod pos;
pub mod render;
pub mod text_metrics;
pub mod theme;
pub mod tokenize;

#[cfg(feature = "cli")]
pub use cli::run;
