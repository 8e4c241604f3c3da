//! Data models for the travel planner
//!
//! This module contains the core domain models organized by concern:
//! - Date: normalized `dd/mm/yyyy` travel dates and their extraction
//! - Destination: city name and generated summary
//! - Forecast: forecast points converted from provider payloads
//! - Lodging: lodging search results
//! - Currency: exchange rate tables

pub mod currency;
pub mod date;
pub mod destination;
pub mod forecast;
pub mod lodging;

// Re-export all public types for convenient access
pub use currency::RateTable;
pub use date::{NormalizedDate, extract_last_date};
pub use destination::DestinationDescriptor;
pub use forecast::{ForecastPoint, points_from_openweather};
pub use lodging::LodgingResult;
