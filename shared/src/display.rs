//! Presentation helpers used by the record lists.

use chrono::{Datelike, NaiveDate};

use crate::{CheckupType, DeliveryType, Gender, Patient, VaccineType};

/// Days ahead of a follow-up date at which it counts as due soon
pub const DUE_SOON_DAYS: i64 = 7;

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl DeliveryType {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryType::Normal => "Normal",
            DeliveryType::Caesarean => "Caesarean",
            DeliveryType::Assisted => "Assisted",
        }
    }
}

impl VaccineType {
    pub fn label(&self) -> &'static str {
        match self {
            VaccineType::Basic => "Basic",
            VaccineType::Additional => "Additional",
            VaccineType::Booster => "Booster",
        }
    }
}

impl CheckupType {
    pub fn label(&self) -> &'static str {
        match self {
            CheckupType::Routine => "Routine",
            CheckupType::Pregnancy => "Pregnancy",
            CheckupType::Child => "Child",
            CheckupType::Adult => "Adult",
            CheckupType::Elderly => "Elderly",
        }
    }
}

/// Where a scheduled follow-up (next vaccination, next checkup) stands today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpStatus {
    Overdue,
    DueSoon,
    Scheduled,
}

impl FollowUpStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FollowUpStatus::Overdue => "Overdue",
            FollowUpStatus::DueSoon => "Due soon",
            FollowUpStatus::Scheduled => "Scheduled",
        }
    }

    /// CSS modifier for the status badge
    pub fn css_class(&self) -> &'static str {
        match self {
            FollowUpStatus::Overdue => "badge-overdue",
            FollowUpStatus::DueSoon => "badge-due-soon",
            FollowUpStatus::Scheduled => "badge-scheduled",
        }
    }
}

pub fn follow_up_status(next_date: NaiveDate, today: NaiveDate) -> FollowUpStatus {
    let days_left = (next_date - today).num_days();
    if days_left < 0 {
        FollowUpStatus::Overdue
    } else if days_left <= DUE_SOON_DAYS {
        FollowUpStatus::DueSoon
    } else {
        FollowUpStatus::Scheduled
    }
}

/// Age in completed years
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Name of the referenced patient, or a placeholder when the list doesn't contain it
pub fn patient_name(patients: &[Patient], patient_id: i64) -> String {
    patients
        .iter()
        .find(|p| p.id == patient_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("Patient ID: {}", patient_id))
}

/// Format a date as "17 May 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

pub fn format_optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = date("1990-06-15");
        assert_eq!(age_on(dob, date("2024-06-14")), 33);
        assert_eq!(age_on(dob, date("2024-06-15")), 34);
        assert_eq!(age_on(dob, date("2024-12-01")), 34);
        assert_eq!(age_on(dob, date("1990-06-15")), 0);
    }

    #[test]
    fn test_follow_up_status() {
        let today = date("2024-03-10");
        assert_eq!(follow_up_status(date("2024-03-09"), today), FollowUpStatus::Overdue);
        assert_eq!(follow_up_status(date("2024-03-10"), today), FollowUpStatus::DueSoon);
        assert_eq!(follow_up_status(date("2024-03-17"), today), FollowUpStatus::DueSoon);
        assert_eq!(follow_up_status(date("2024-03-18"), today), FollowUpStatus::Scheduled);
    }

    #[test]
    fn test_patient_name_fallback() {
        let now = Utc::now();
        let patients = vec![Patient {
            id: 4,
            name: "Dewi Lestari".to_string(),
            date_of_birth: date("1992-08-21"),
            gender: Gender::Female,
            phone: None,
            address: None,
            created_at: now,
            updated_at: now,
        }];

        assert_eq!(patient_name(&patients, 4), "Dewi Lestari");
        assert_eq!(patient_name(&patients, 9), "Patient ID: 9");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_date(date("2024-05-07")), "7 May 2024");
        assert_eq!(format_optional(Some(3.25), "kg"), "3.25 kg");
        assert_eq!(format_optional(None, "kg"), "-");
        assert_eq!(CheckupType::Pregnancy.label(), "Pregnancy");
    }
}
