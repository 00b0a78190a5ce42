pub mod bounds;
pub mod geo;
pub mod round;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use geo::*;
pub use round::*;
