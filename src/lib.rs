#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod generate;
pub mod measure;
pub mod params;
pub mod query;
pub mod sanitize;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, DocumentDefaults, load_config};
pub use generate::{generate_svg, generate_svg_with};
pub use params::SvgParams;
pub use query::params_from_query;
