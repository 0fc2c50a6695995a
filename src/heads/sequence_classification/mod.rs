/// Sequence Classifier Config
pub mod config;

/// Sequence Classifier
pub mod model;

/// Training and validation steps
pub mod train;

pub use config::Config;
pub use model::{Model, ModelRecord, DEFAULT_IDX_CONDITIONED_ON};
pub use train::Train;
