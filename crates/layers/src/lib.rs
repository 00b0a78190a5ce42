pub mod scatter;
pub mod symbology;

pub use scatter::*;
pub use symbology::*;
