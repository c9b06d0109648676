//! # Storage Module
//!
//! SQLite persistence for the clinic records. One repository per table, all
//! sharing a single pooled [`DbConnection`]. Dates, timestamps and decimals are
//! stored as text and converted by [`codec`] when rows are read back.

pub mod codec;
pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    DeliveryServiceRepository, ImmunizationRepository, MedicalCheckupRepository,
    PatientRepository,
};
