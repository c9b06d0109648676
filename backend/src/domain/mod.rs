//! # Domain Module
//!
//! One service per record type. Services validate their input, talk to the
//! matching repository and translate storage outcomes into [`ClinicError`].

pub mod delivery_record_service;
pub mod error;
pub mod immunization_service;
pub mod medical_checkup_service;
pub mod patient_service;

pub use delivery_record_service::DeliveryRecordService;
pub use error::{ClinicError, ClinicResult};
pub use immunization_service::ImmunizationService;
pub use medical_checkup_service::MedicalCheckupService;
pub use patient_service::PatientService;
