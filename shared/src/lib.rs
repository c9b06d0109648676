use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod display;
pub mod forms;
pub mod validation;

pub use validation::{Validate, ValidationError, ValidationErrors};

/// Error returned when a stored or submitted string is not part of a closed value set
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed enumeration that travels as a lowercase string, both on the
/// wire and in the database.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum!(
    /// Gender of a patient or of a newborn
    Gender, "gender" {
        Male => "male",
        Female => "female",
    }
);

string_enum!(
    /// How a delivery was performed
    DeliveryType, "delivery type" {
        Normal => "normal",
        Caesarean => "caesarean",
        Assisted => "assisted",
    }
);

string_enum!(
    /// Place of a vaccine in the immunization schedule
    VaccineType, "vaccine type" {
        Basic => "basic",
        Additional => "additional",
        Booster => "booster",
    }
);

string_enum!(
    /// Kind of medical checkup
    CheckupType, "checkup type" {
        Routine => "routine",
        Pregnancy => "pregnancy",
        Child => "child",
        Adult => "adult",
        Elderly => "elderly",
    }
);

/// Change to a nullable field in a partial update.
///
/// An omitted field stays `Unchanged`, an explicit `null` becomes `Clear`,
/// and any other value becomes `Set`. Fields using this type must be declared
/// with `#[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]`
/// so that omission survives a round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }

    /// Apply this update to the current value of a nullable field
    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => *current = None,
            FieldUpdate::Set(value) => *current = Some(value),
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldUpdate::Set(value) => serializer.serialize_some(value),
            FieldUpdate::Clear | FieldUpdate::Unchanged => serializer.serialize_none(),
        }
    }
}

/// Optional field that may be omitted but never sent as `null`
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(de::Error::custom("field may be omitted but cannot be null")),
    }
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePatientInput {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePatientInput {
    pub id: i64,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub phone: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub address: FieldUpdate<String>,
}

impl UpdatePatientInput {
    /// An update for `id` that changes nothing but the update timestamp
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            date_of_birth: None,
            gender: None,
            phone: FieldUpdate::Unchanged,
            address: FieldUpdate::Unchanged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetPatientByIdInput {
    pub id: i64,
}

/// Lookup input shared by every "records of one patient" procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetServicesByPatientIdInput {
    #[serde(rename = "patientId")]
    pub patient_id: i64,
}

// ---------------------------------------------------------------------------
// Delivery services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryService {
    pub id: i64,
    pub patient_id: i64,
    pub delivery_date: NaiveDate,
    pub delivery_type: DeliveryType,
    /// Kilograms, two fraction digits
    pub baby_weight: f64,
    pub baby_gender: Gender,
    pub baby_name: Option<String>,
    pub complications: Option<String>,
    pub doctor_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDeliveryServiceInput {
    pub patient_id: i64,
    pub delivery_date: NaiveDate,
    pub delivery_type: DeliveryType,
    pub baby_weight: f64,
    pub baby_gender: Gender,
    pub baby_name: Option<String>,
    pub complications: Option<String>,
    pub doctor_name: String,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Immunizations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Immunization {
    pub id: i64,
    pub patient_id: i64,
    pub vaccine_name: String,
    pub vaccine_type: VaccineType,
    pub vaccination_date: NaiveDate,
    pub next_vaccination_date: Option<NaiveDate>,
    pub batch_number: Option<String>,
    pub administered_by: String,
    pub side_effects: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateImmunizationInput {
    pub patient_id: i64,
    pub vaccine_name: String,
    pub vaccine_type: VaccineType,
    pub vaccination_date: NaiveDate,
    pub next_vaccination_date: Option<NaiveDate>,
    pub batch_number: Option<String>,
    pub administered_by: String,
    pub side_effects: Option<String>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Medical checkups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalCheckup {
    pub id: i64,
    pub patient_id: i64,
    pub checkup_date: NaiveDate,
    pub checkup_type: CheckupType,
    /// Kilograms, two fraction digits
    pub weight: Option<f64>,
    /// Centimetres, two fraction digits
    pub height: Option<f64>,
    pub blood_pressure: Option<String>,
    /// Degrees Celsius, one fraction digit
    pub temperature: Option<f64>,
    pub heart_rate: Option<i32>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medication_prescribed: Option<String>,
    pub doctor_name: String,
    pub next_checkup_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMedicalCheckupInput {
    pub patient_id: i64,
    pub checkup_date: NaiveDate,
    pub checkup_type: CheckupType,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub blood_pressure: Option<String>,
    pub temperature: Option<f64>,
    pub heart_rate: Option<i32>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medication_prescribed: Option<String>,
    pub doctor_name: String,
    pub next_checkup_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMedicalCheckupInput {
    pub id: i64,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub checkup_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub checkup_type: Option<CheckupType>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub weight: FieldUpdate<f64>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub height: FieldUpdate<f64>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub blood_pressure: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub temperature: FieldUpdate<f64>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub heart_rate: FieldUpdate<i32>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub symptoms: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub diagnosis: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub treatment: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub medication_prescribed: FieldUpdate<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub next_checkup_date: FieldUpdate<NaiveDate>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub notes: FieldUpdate<String>,
}

impl UpdateMedicalCheckupInput {
    /// An update for `id` that changes nothing but the update timestamp
    pub fn new(id: i64) -> Self {
        Self {
            id,
            patient_id: None,
            checkup_date: None,
            checkup_type: None,
            weight: FieldUpdate::Unchanged,
            height: FieldUpdate::Unchanged,
            blood_pressure: FieldUpdate::Unchanged,
            temperature: FieldUpdate::Unchanged,
            heart_rate: FieldUpdate::Unchanged,
            symptoms: FieldUpdate::Unchanged,
            diagnosis: FieldUpdate::Unchanged,
            treatment: FieldUpdate::Unchanged,
            medication_prescribed: FieldUpdate::Unchanged,
            doctor_name: None,
            next_checkup_date: FieldUpdate::Unchanged,
            notes: FieldUpdate::Unchanged,
        }
    }
}

// ---------------------------------------------------------------------------
// Service responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of every failed procedure call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(serde_json::to_value(DeliveryType::Caesarean).unwrap(), json!("caesarean"));
        assert_eq!(
            serde_json::from_value::<CheckupType>(json!("elderly")).unwrap(),
            CheckupType::Elderly
        );
        assert!(serde_json::from_value::<VaccineType>(json!("experimental")).is_err());
        assert!(serde_json::from_value::<Gender>(json!("Male")).is_err());
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!("booster".parse::<VaccineType>().unwrap(), VaccineType::Booster);

        let err = "unknown".parse::<Gender>().unwrap_err();
        assert_eq!(err.to_string(), "'unknown' is not a valid gender");
        assert_eq!(CheckupType::ALL.len(), 5);
    }

    #[test]
    fn test_patient_update_distinguishes_omitted_and_null() {
        let input: UpdatePatientInput = serde_json::from_value(json!({
            "id": 7,
            "phone": null,
            "address": "Jl. Merdeka 1"
        }))
        .unwrap();

        assert_eq!(input.id, 7);
        assert_eq!(input.name, None);
        assert_eq!(input.phone, FieldUpdate::Clear);
        assert_eq!(input.address, FieldUpdate::Set("Jl. Merdeka 1".to_string()));
    }

    #[test]
    fn test_update_rejects_null_for_required_field() {
        let result = serde_json::from_value::<UpdatePatientInput>(json!({
            "id": 1,
            "name": null
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<UpdateMedicalCheckupInput>(json!({
            "id": 1,
            "doctor_name": null
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_serialization_skips_unchanged_fields() {
        let mut input = UpdateMedicalCheckupInput::new(3);
        input.weight = FieldUpdate::Set(70.5);
        input.notes = FieldUpdate::Clear;

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({ "id": 3, "weight": 70.5, "notes": null }));

        let back: UpdateMedicalCheckupInput = serde_json::from_value(value).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_field_update_apply() {
        let mut value = Some("old".to_string());
        FieldUpdate::Unchanged.apply_to(&mut value);
        assert_eq!(value.as_deref(), Some("old"));

        FieldUpdate::Set("new".to_string()).apply_to(&mut value);
        assert_eq!(value.as_deref(), Some("new"));

        FieldUpdate::Clear.apply_to(&mut value);
        assert_eq!(value, None);
    }

    #[test]
    fn test_patient_lookup_uses_camel_case() {
        let input: GetServicesByPatientIdInput =
            serde_json::from_value(json!({ "patientId": 12 })).unwrap();
        assert_eq!(input.patient_id, 12);
    }

    #[test]
    fn test_dates_use_iso_format() {
        let input: CreatePatientInput = serde_json::from_value(json!({
            "name": "Siti Rahma",
            "date_of_birth": "1990-05-17",
            "gender": "female",
            "phone": null,
            "address": null
        }))
        .unwrap();
        assert_eq!(input.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["date_of_birth"], json!("1990-05-17"));
    }
}
