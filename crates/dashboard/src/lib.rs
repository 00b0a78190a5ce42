pub mod controls;
pub mod notice;
pub mod settings;
pub mod view;

pub use controls::*;
pub use notice::*;
pub use settings::*;
pub use view::*;

pub use compute::{CapacityRange, SummaryMetrics};
