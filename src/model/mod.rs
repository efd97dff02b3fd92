pub mod snapshot;
pub mod types;
pub mod validation;

pub use snapshot::*;
pub use types::*;
pub use validation::{validate_snapshot, validate_tee_holes};
