//! Input rules applied to every create and update request before it reaches storage.
//!
//! Shape rules (required fields, closed enum sets, `null` on non-nullable update
//! fields) are enforced by deserialization. The rules here cover what the type
//! system cannot: non-empty names, positive measurements and the precision of
//! the decimal columns.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    CreateDeliveryServiceInput, CreateImmunizationInput, CreateMedicalCheckupInput,
    CreatePatientInput, FieldUpdate, UpdateMedicalCheckupInput, UpdatePatientInput,
};

/// Decimal columns hold at most three integer digits (`NUMERIC(5,2)` / `NUMERIC(4,1)`)
pub const DECIMAL_LIMIT: f64 = 1000.0;

/// Fraction digits of `baby_weight`, `weight` and `height`
pub const WEIGHT_SCALE: usize = 2;
/// Fraction digits of `temperature`
pub const TEMPERATURE_SCALE: usize = 1;

/// The value a decimal column ends up holding once written at `scale` digits
pub fn round_to_scale(value: f64, scale: usize) -> f64 {
    format!("{:.*}", scale, value).parse().unwrap_or(value)
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(String),
    #[error("{0} must be positive")]
    NotPositive(String),
    #[error("{0} must be a finite number")]
    NotFinite(String),
    #[error("{field} must be smaller than {limit} in magnitude")]
    OutOfRange { field: String, limit: f64 },
}

/// All violations found in one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "Invalid input: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by every request shape accepted by a mutating procedure
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[derive(Default)]
struct Rules {
    errors: Vec<ValidationError>,
}

impl Rules {
    fn non_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::EmptyField(field.to_string()));
        }
        self
    }

    fn decimal(&mut self, field: &str, value: f64, scale: usize) -> &mut Self {
        if !value.is_finite() {
            self.errors.push(ValidationError::NotFinite(field.to_string()));
        } else if round_to_scale(value, scale).abs() >= DECIMAL_LIMIT {
            self.errors.push(ValidationError::OutOfRange {
                field: field.to_string(),
                limit: DECIMAL_LIMIT,
            });
        }
        self
    }

    fn positive_decimal(&mut self, field: &str, value: f64, scale: usize) -> &mut Self {
        if value.is_finite() && round_to_scale(value, scale) <= 0.0 {
            self.errors.push(ValidationError::NotPositive(field.to_string()));
        }
        self.decimal(field, value, scale)
    }

    fn positive_integer(&mut self, field: &str, value: i32) -> &mut Self {
        if value <= 0 {
            self.errors.push(ValidationError::NotPositive(field.to_string()));
        }
        self
    }

    fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}

impl Validate for CreatePatientInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::default().non_empty("name", &self.name).finish()
    }
}

impl Validate for UpdatePatientInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::default();
        if let Some(name) = &self.name {
            rules.non_empty("name", name);
        }
        rules.finish()
    }
}

impl Validate for CreateDeliveryServiceInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::default()
            .positive_decimal("baby_weight", self.baby_weight, WEIGHT_SCALE)
            .non_empty("doctor_name", &self.doctor_name)
            .finish()
    }
}

impl Validate for CreateImmunizationInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::default()
            .non_empty("vaccine_name", &self.vaccine_name)
            .non_empty("administered_by", &self.administered_by)
            .finish()
    }
}

impl Validate for CreateMedicalCheckupInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::default();
        if let Some(weight) = self.weight {
            rules.positive_decimal("weight", weight, WEIGHT_SCALE);
        }
        if let Some(height) = self.height {
            rules.positive_decimal("height", height, WEIGHT_SCALE);
        }
        if let Some(temperature) = self.temperature {
            rules.decimal("temperature", temperature, TEMPERATURE_SCALE);
        }
        if let Some(heart_rate) = self.heart_rate {
            rules.positive_integer("heart_rate", heart_rate);
        }
        rules.non_empty("doctor_name", &self.doctor_name).finish()
    }
}

impl Validate for UpdateMedicalCheckupInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::default();
        if let FieldUpdate::Set(weight) = self.weight {
            rules.positive_decimal("weight", weight, WEIGHT_SCALE);
        }
        if let FieldUpdate::Set(height) = self.height {
            rules.positive_decimal("height", height, WEIGHT_SCALE);
        }
        if let FieldUpdate::Set(temperature) = self.temperature {
            rules.decimal("temperature", temperature, TEMPERATURE_SCALE);
        }
        if let FieldUpdate::Set(heart_rate) = self.heart_rate {
            rules.positive_integer("heart_rate", heart_rate);
        }
        if let Some(doctor_name) = &self.doctor_name {
            rules.non_empty("doctor_name", doctor_name);
        }
        rules.finish()
    }
}
