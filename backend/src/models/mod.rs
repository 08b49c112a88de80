pub mod assessment;
pub mod pollutant;
pub mod sensor;
pub mod time;

pub use assessment::*;
pub use pollutant::*;
pub use sensor::*;
pub use time::*;
