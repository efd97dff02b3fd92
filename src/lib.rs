pub mod args;
pub mod config;
pub mod error;
pub mod handicap;
pub mod model;
pub mod queue;
