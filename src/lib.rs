pub mod app;
pub mod classifier;
pub mod db;
pub mod models;

pub use app::Application;
pub use classifier::{AgeRange, BugClassifier};
pub use models::{Bug, BugState, DecodeError};
