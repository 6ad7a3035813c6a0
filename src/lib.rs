pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod publish;
pub mod schema;

pub use crate::config::{Credentials, TrainConfig};
pub use crate::error::TrainError;
pub use crate::features::{TrainingRow, FEATURE_NAMES, NUM_FEATURES};
pub use crate::model::LogisticModel;
