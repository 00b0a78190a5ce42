pub mod facility;
pub mod facility_csv;

pub use facility::*;
pub use facility_csv::*;
