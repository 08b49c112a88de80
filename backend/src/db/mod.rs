//! Access to the external sensor-data source.
//!
//! The core does not persist anything. This module abstracts where the
//! location and reading tables come from via the Repository pattern, so the
//! store can be fed from CSV files in production and from memory in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  ObservationStore / HTTP handlers                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - health check                                         │
//! │  - fetch + join for one date                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - SensorDataRepository  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │  CsvRepository  LocalRepository │
//!     └──────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//! ```ignore
//! use airq::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_default_config()?;
//!     let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//!     let outcome = services::load_observations(repo.as_ref(), date).await?;
//!     println!("{} sensors reporting", outcome.observations.len());
//!     Ok(())
//! }
//! ```

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

pub use services::{health_check, load_observations};

pub use repo_config::RepositoryConfig;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{CsvConfig, CsvRepository, LocalRepository};
pub use repository::{
    fetch_tables, ErrorContext, RepositoryError, RepositoryResult, SensorDataRepository,
    SensorTables,
};
