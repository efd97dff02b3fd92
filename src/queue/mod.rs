pub mod job;
pub mod runner;
pub mod store;

pub use job::*;
pub use runner::*;
pub use store::*;
