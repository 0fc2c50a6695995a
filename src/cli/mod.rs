/// CLI Indexes: available heads
pub mod heads;

/// Head configuration loading and defaults
pub mod config;

/// Smoke runs over random hidden states
pub mod run;

pub use config::{HeadConfig, Sizes};
pub use heads::{Head, HeadError};
pub use run::{ports, run, Prediction, Report, RunOptions};
