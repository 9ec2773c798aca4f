pub mod heat_imputer;
pub mod regression;

pub use heat_imputer::HeatImputer;
pub use regression::PowerLawFit;
