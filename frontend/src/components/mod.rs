pub mod checkup_manager;
pub mod checkup_modal;
pub mod delivery_manager;
pub mod delivery_modal;
pub mod forms;
pub mod header;
pub mod immunization_manager;
pub mod immunization_modal;
pub mod modal;
pub mod patient_detail;
pub mod patient_manager;
pub mod patient_modal;
pub mod record_list;
