pub mod adjustment;
pub mod differential;
pub mod engine;
pub mod index;
pub mod rounding;

pub use adjustment::*;
pub use differential::*;
pub use engine::{HandicapEngine, ProcessedRound, calculate_user_handicap};
pub use index::*;
pub use rounding::*;
