pub mod outcome;
pub mod pyth;
pub mod signature;

pub use outcome::*;
pub use pyth::*;
pub use signature::*;
