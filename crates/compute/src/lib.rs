pub mod analysis;
pub mod filter;
pub mod summary;

pub use filter::*;
pub use summary::*;
