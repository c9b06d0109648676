pub mod delivery_service_repository;
pub mod immunization_repository;
pub mod medical_checkup_repository;
pub mod patient_repository;

pub use delivery_service_repository::DeliveryServiceRepository;
pub use immunization_repository::ImmunizationRepository;
pub use medical_checkup_repository::MedicalCheckupRepository;
pub use patient_repository::PatientRepository;
