//! String-backed form state for the create and edit dialogs.
//!
//! Every input element edits a `String`; conversion into a typed request happens
//! once on submit. Blank optional fields become `null`.

use chrono::NaiveDate;

use crate::{
    CheckupType, CreateDeliveryServiceInput, CreateImmunizationInput, CreateMedicalCheckupInput,
    CreatePatientInput, DeliveryType, FieldUpdate, Gender, MedicalCheckup, Patient,
    UpdateMedicalCheckupInput, UpdatePatientInput, VaccineType,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter the {0}")]
    Missing(&'static str),
    #[error("The {0} must be a date in YYYY-MM-DD format")]
    InvalidDate(&'static str),
    #[error("The {0} must be a number")]
    InvalidNumber(&'static str),
    #[error("The {0} must be a whole number")]
    InvalidInteger(&'static str),
    #[error("Please select a patient")]
    NoPatientSelected,
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, FormError> {
    optional_text(value).ok_or(FormError::Missing(field))
}

fn optional_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, FormError> {
    match optional_text(value) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| FormError::InvalidDate(field)),
    }
}

fn required_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    optional_date(field, value)?.ok_or(FormError::Missing(field))
}

fn optional_decimal(field: &'static str, value: &str) -> Result<Option<f64>, FormError> {
    match optional_text(value) {
        None => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or(FormError::InvalidNumber(field)),
    }
}

fn required_decimal(field: &'static str, value: &str) -> Result<f64, FormError> {
    optional_decimal(field, value)?.ok_or(FormError::Missing(field))
}

fn optional_integer(field: &'static str, value: &str) -> Result<Option<i32>, FormError> {
    match optional_text(value) {
        None => Ok(None),
        Some(text) => text
            .parse::<i32>()
            .map(Some)
            .map_err(|_| FormError::InvalidInteger(field)),
    }
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
}

fn number_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PatientForm {
    pub name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub phone: String,
    pub address: String,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            date_of_birth: String::new(),
            gender: Gender::Male,
            phone: String::new(),
            address: String::new(),
        }
    }
}

impl PatientForm {
    /// Pre-populate the edit dialog
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            date_of_birth: date_text(Some(patient.date_of_birth)),
            gender: patient.gender,
            phone: patient.phone.clone().unwrap_or_default(),
            address: patient.address.clone().unwrap_or_default(),
        }
    }

    pub fn to_create_input(&self) -> Result<CreatePatientInput, FormError> {
        Ok(CreatePatientInput {
            name: required_text("name", &self.name)?,
            date_of_birth: required_date("date of birth", &self.date_of_birth)?,
            gender: self.gender,
            phone: optional_text(&self.phone),
            address: optional_text(&self.address),
        })
    }

    /// Full-value update: every field is sent, blanks clear the nullable ones
    pub fn to_update_input(&self, id: i64) -> Result<UpdatePatientInput, FormError> {
        let create = self.to_create_input()?;
        Ok(UpdatePatientInput {
            id,
            name: Some(create.name),
            date_of_birth: Some(create.date_of_birth),
            gender: Some(create.gender),
            phone: create.phone.into(),
            address: create.address.into(),
        })
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryServiceForm {
    pub patient_id: Option<i64>,
    pub delivery_date: String,
    pub delivery_type: DeliveryType,
    pub baby_weight: String,
    pub baby_gender: Gender,
    pub baby_name: String,
    pub complications: String,
    pub doctor_name: String,
    pub notes: String,
}

impl DeliveryServiceForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            patient_id: None,
            delivery_date: date_text(Some(today)),
            delivery_type: DeliveryType::Normal,
            baby_weight: String::new(),
            baby_gender: Gender::Male,
            baby_name: String::new(),
            complications: String::new(),
            doctor_name: String::new(),
            notes: String::new(),
        }
    }

    pub fn to_create_input(&self) -> Result<CreateDeliveryServiceInput, FormError> {
        Ok(CreateDeliveryServiceInput {
            patient_id: self.patient_id.ok_or(FormError::NoPatientSelected)?,
            delivery_date: required_date("delivery date", &self.delivery_date)?,
            delivery_type: self.delivery_type,
            baby_weight: required_decimal("baby weight", &self.baby_weight)?,
            baby_gender: self.baby_gender,
            baby_name: optional_text(&self.baby_name),
            complications: optional_text(&self.complications),
            doctor_name: required_text("doctor name", &self.doctor_name)?,
            notes: optional_text(&self.notes),
        })
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ImmunizationForm {
    pub patient_id: Option<i64>,
    pub vaccine_name: String,
    pub vaccine_type: VaccineType,
    pub vaccination_date: String,
    pub next_vaccination_date: String,
    pub batch_number: String,
    pub administered_by: String,
    pub side_effects: String,
    pub notes: String,
}

impl ImmunizationForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            patient_id: None,
            vaccine_name: String::new(),
            vaccine_type: VaccineType::Basic,
            vaccination_date: date_text(Some(today)),
            next_vaccination_date: String::new(),
            batch_number: String::new(),
            administered_by: String::new(),
            side_effects: String::new(),
            notes: String::new(),
        }
    }

    pub fn to_create_input(&self) -> Result<CreateImmunizationInput, FormError> {
        Ok(CreateImmunizationInput {
            patient_id: self.patient_id.ok_or(FormError::NoPatientSelected)?,
            vaccine_name: required_text("vaccine name", &self.vaccine_name)?,
            vaccine_type: self.vaccine_type,
            vaccination_date: required_date("vaccination date", &self.vaccination_date)?,
            next_vaccination_date: optional_date(
                "next vaccination date",
                &self.next_vaccination_date,
            )?,
            batch_number: optional_text(&self.batch_number),
            administered_by: required_text("administering party", &self.administered_by)?,
            side_effects: optional_text(&self.side_effects),
            notes: optional_text(&self.notes),
        })
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MedicalCheckupForm {
    pub patient_id: Option<i64>,
    pub checkup_date: String,
    pub checkup_type: CheckupType,
    pub weight: String,
    pub height: String,
    pub blood_pressure: String,
    pub temperature: String,
    pub heart_rate: String,
    pub symptoms: String,
    pub diagnosis: String,
    pub treatment: String,
    pub medication_prescribed: String,
    pub doctor_name: String,
    pub next_checkup_date: String,
    pub notes: String,
}

impl MedicalCheckupForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            patient_id: None,
            checkup_date: date_text(Some(today)),
            checkup_type: CheckupType::Routine,
            weight: String::new(),
            height: String::new(),
            blood_pressure: String::new(),
            temperature: String::new(),
            heart_rate: String::new(),
            symptoms: String::new(),
            diagnosis: String::new(),
            treatment: String::new(),
            medication_prescribed: String::new(),
            doctor_name: String::new(),
            next_checkup_date: String::new(),
            notes: String::new(),
        }
    }

    /// Pre-populate the edit dialog
    pub fn from_checkup(checkup: &MedicalCheckup) -> Self {
        Self {
            patient_id: Some(checkup.patient_id),
            checkup_date: date_text(Some(checkup.checkup_date)),
            checkup_type: checkup.checkup_type,
            weight: number_text(checkup.weight),
            height: number_text(checkup.height),
            blood_pressure: checkup.blood_pressure.clone().unwrap_or_default(),
            temperature: number_text(checkup.temperature),
            heart_rate: number_text(checkup.heart_rate),
            symptoms: checkup.symptoms.clone().unwrap_or_default(),
            diagnosis: checkup.diagnosis.clone().unwrap_or_default(),
            treatment: checkup.treatment.clone().unwrap_or_default(),
            medication_prescribed: checkup.medication_prescribed.clone().unwrap_or_default(),
            doctor_name: checkup.doctor_name.clone(),
            next_checkup_date: date_text(checkup.next_checkup_date),
            notes: checkup.notes.clone().unwrap_or_default(),
        }
    }

    pub fn to_create_input(&self) -> Result<CreateMedicalCheckupInput, FormError> {
        Ok(CreateMedicalCheckupInput {
            patient_id: self.patient_id.ok_or(FormError::NoPatientSelected)?,
            checkup_date: required_date("checkup date", &self.checkup_date)?,
            checkup_type: self.checkup_type,
            weight: optional_decimal("weight", &self.weight)?,
            height: optional_decimal("height", &self.height)?,
            blood_pressure: optional_text(&self.blood_pressure),
            temperature: optional_decimal("temperature", &self.temperature)?,
            heart_rate: optional_integer("heart rate", &self.heart_rate)?,
            symptoms: optional_text(&self.symptoms),
            diagnosis: optional_text(&self.diagnosis),
            treatment: optional_text(&self.treatment),
            medication_prescribed: optional_text(&self.medication_prescribed),
            doctor_name: required_text("doctor name", &self.doctor_name)?,
            next_checkup_date: optional_date("next checkup date", &self.next_checkup_date)?,
            notes: optional_text(&self.notes),
        })
    }

    /// Full-value update: every field is sent, blanks clear the nullable ones
    pub fn to_update_input(&self, id: i64) -> Result<UpdateMedicalCheckupInput, FormError> {
        let create = self.to_create_input()?;
        Ok(UpdateMedicalCheckupInput {
            id,
            patient_id: Some(create.patient_id),
            checkup_date: Some(create.checkup_date),
            checkup_type: Some(create.checkup_type),
            weight: create.weight.into(),
            height: create.height.into(),
            blood_pressure: create.blood_pressure.into(),
            temperature: create.temperature.into(),
            heart_rate: create.heart_rate.into(),
            symptoms: create.symptoms.into(),
            diagnosis: create.diagnosis.into(),
            treatment: create.treatment.into(),
            medication_prescribed: create.medication_prescribed.into(),
            doctor_name: Some(create.doctor_name),
            next_checkup_date: create.next_checkup_date.into(),
            notes: create.notes.into(),
        })
    }
}

/// Whether an update leaves a nullable field empty
pub fn clears<T>(update: &FieldUpdate<T>) -> bool {
    matches!(update, FieldUpdate::Clear)
}
