//! Modelcast Bootstrap - Startup glue for the transformation engine
//!
//! Loads the application configuration, initializes structured logging and
//! registers transformer definitions so the engine is ready to use.
//!
//! # Example
//!
//! ```no_run
//! use modelcast_bootstrap::{init_logging, AppConfig, Runtime};
//! # use modelcast_core::TransformerDefinition;
//! # fn definitions() -> Vec<TransformerDefinition> { Vec::new() }
//!
//! fn main() -> modelcast_bootstrap::Result<()> {
//!     let config = AppConfig::load_with_file(None)?;
//!     init_logging(&config.logging)?;
//!
//!     let runtime = Runtime::boot(config, definitions())?;
//!     let _ctx = runtime.context();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{AppConfig, ConfigFormat, LogFormat, LoggingConfig};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use runtime::Runtime;
