mod client;
mod config;
mod error;
mod models;

pub use client::ChallongeClient;
pub use config::ChallongeConfig;
pub use error::{ChallongeError, ChallongeResult};
