pub mod clock;
pub mod timestamp;

pub use clock::*;
pub use timestamp::*;
