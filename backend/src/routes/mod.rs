pub mod observations;
pub mod selection;
pub mod sessions;
pub mod standards;
