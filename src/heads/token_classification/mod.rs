/// Token Classifier Config
pub mod config;

/// Token Classifier
pub mod model;

/// Loss-bearing output
pub mod output;

/// Training and validation steps
pub mod train;

pub use config::Config;
pub use model::{Model, ModelRecord};
pub use output::Output;
pub use train::Train;
