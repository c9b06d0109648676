use chrono::NaiveDate;
use shared::display::{age_on, format_date};
use shared::{DeliveryService, Immunization, MedicalCheckup, Patient};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::modal::Modal;
use super::record_list::{follow_up_cell, optional_text};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct PatientDetailProps {
    pub patient_id: i64,
    pub today: NaiveDate,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
}

/// Everything recorded for one patient
#[derive(Clone, PartialEq)]
struct PatientHistory {
    patient: Option<Patient>,
    deliveries: Vec<DeliveryService>,
    immunizations: Vec<Immunization>,
    checkups: Vec<MedicalCheckup>,
}

async fn load_history(api_client: &ApiClient, patient_id: i64) -> Result<PatientHistory, String> {
    let patient = api_client.get_patient_by_id(patient_id).await?;
    if patient.is_none() {
        return Ok(PatientHistory {
            patient,
            deliveries: Vec::new(),
            immunizations: Vec::new(),
            checkups: Vec::new(),
        });
    }

    Ok(PatientHistory {
        patient,
        deliveries: api_client.get_delivery_services_by_patient(patient_id).await?,
        immunizations: api_client.get_immunizations_by_patient(patient_id).await?,
        checkups: api_client.get_medical_checkups_by_patient(patient_id).await?,
    })
}

#[function_component(PatientDetail)]
pub fn patient_detail(props: &PatientDetailProps) -> Html {
    let history = use_state(|| Option::<PatientHistory>::None);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with(props.patient_id, {
        let history = history.clone();
        let error_message = error_message.clone();
        let api_client = props.api_client.clone();
        move |patient_id| {
            let patient_id = *patient_id;
            history.set(None);
            error_message.set(None);

            spawn_local(async move {
                match load_history(&api_client, patient_id).await {
                    Ok(loaded) => history.set(Some(loaded)),
                    Err(e) => {
                        gloo::console::error!("Failed to load patient history:", e.clone());
                        error_message.set(Some(e));
                    }
                }
            });
            || ()
        }
    });

    let body = match (&*history, &*error_message) {
        (_, Some(error)) => html! { <div class="list-error">{error}</div> },
        (None, None) => html! { <div class="loading">{"Loading..."}</div> },
        (Some(PatientHistory { patient: None, .. }), None) => html! {
            <div class="empty-state">{format!("Patient ID: {} was not found", props.patient_id)}</div>
        },
        (Some(PatientHistory { patient: Some(patient), deliveries, immunizations, checkups }), None) => html! {
            <>
                <dl class="patient-summary">
                    <dt>{"Born"}</dt>
                    <dd>{format!("{} ({} years)", format_date(patient.date_of_birth), age_on(patient.date_of_birth, props.today))}</dd>
                    <dt>{"Gender"}</dt>
                    <dd>{patient.gender.label()}</dd>
                    <dt>{"Phone"}</dt>
                    <dd>{optional_text(&patient.phone)}</dd>
                    <dt>{"Address"}</dt>
                    <dd>{optional_text(&patient.address)}</dd>
                </dl>

                <h4>{format!("Checkups ({})", checkups.len())}</h4>
                <ul class="history-list">
                    {for checkups.iter().map(|c| html! {
                        <li key={c.id}>
                            {format!("{} · {} · {}", format_date(c.checkup_date), c.checkup_type.label(), c.doctor_name)}
                            {" · next: "}{follow_up_cell(c.next_checkup_date, props.today)}
                        </li>
                    })}
                </ul>

                <h4>{format!("Immunizations ({})", immunizations.len())}</h4>
                <ul class="history-list">
                    {for immunizations.iter().map(|i| html! {
                        <li key={i.id}>
                            {format!("{} · {} ({})", format_date(i.vaccination_date), i.vaccine_name, i.vaccine_type.label())}
                            {" · next: "}{follow_up_cell(i.next_vaccination_date, props.today)}
                        </li>
                    })}
                </ul>

                <h4>{format!("Deliveries ({})", deliveries.len())}</h4>
                <ul class="history-list">
                    {for deliveries.iter().map(|d| html! {
                        <li key={d.id}>
                            {format!(
                                "{} · {} · {} kg {}",
                                format_date(d.delivery_date),
                                d.delivery_type.label(),
                                d.baby_weight,
                                d.baby_gender.label()
                            )}
                        </li>
                    })}
                </ul>
            </>
        },
    };

    let title = match &*history {
        Some(PatientHistory { patient: Some(patient), .. }) => patient.name.clone(),
        _ => "Patient History".to_string(),
    };

    html! {
        <Modal title={title} on_close={props.on_close.clone()}>
            <div class="patient-detail">{body}</div>
        </Modal>
    }
}
