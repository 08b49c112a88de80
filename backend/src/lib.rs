//! # Air-Quality Backend
//!
//! Pollutant scoring and nearest-sensor resolution for an urban air-quality map.
//!
//! Sensor positions and daily pollutant readings arrive as two tables. For a
//! chosen date the crate joins them, scores every reading against a reference
//! standard, classifies it into a severity colour and answers "which sensor is
//! closest to this point" queries. The backend exposes a REST API via Axum for
//! the map frontend.
//!
//! ## Features
//!
//! - **Data Loading**: Parse the location and reading tables from CSV
//! - **Scoring**: Weighted severity score per pollutant, composite colour and
//!   textual assessment
//! - **Joining**: Per-date join of readings with sensor coordinates
//! - **Spatial Lookup**: Great-circle nearest sensor for a point
//! - **Sessions**: One observation store per map view, safe against
//!   overlapping date changes
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Pollutants, reference standard, sensors, readings, observations
//! - [`parsing`]: Row records and CSV decoding at the loader boundary
//! - [`services`]: Scoring, join, spatial lookup and per-session state
//! - [`db`]: Repository pattern for the external row source
//! - [`routes`]: Route-specific view types
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;
pub mod parsing;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
