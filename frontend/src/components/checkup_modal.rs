use chrono::NaiveDate;
use shared::forms::MedicalCheckupForm;
use shared::{
    CheckupType, CreateMedicalCheckupInput, MedicalCheckup, Patient, UpdateMedicalCheckupInput,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::forms::bind;
use super::forms::fields::{
    enum_options, FormErrorMessage, PatientSelect, SelectField, TextAreaField, TextField,
};
use super::modal::{Modal, ModalButtons};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct CheckupModalProps {
    pub is_open: bool,
    /// Checkup being edited; `None` records a new one
    #[prop_or_default]
    pub editing: Option<MedicalCheckup>,
    pub patients: Vec<Patient>,
    pub today: NaiveDate,
    pub api_client: ApiClient,
    pub on_success: Callback<MedicalCheckup>,
    pub on_close: Callback<()>,
}

enum Submission {
    Create(CreateMedicalCheckupInput),
    Update(UpdateMedicalCheckupInput),
}

#[function_component(CheckupModal)]
pub fn checkup_modal(props: &CheckupModalProps) -> Html {
    let form = use_state(|| MedicalCheckupForm::new(props.today));
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with((props.is_open, props.editing.clone(), props.today), {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |(is_open, editing, today)| {
            if *is_open {
                form.set(match editing {
                    Some(checkup) => MedicalCheckupForm::from_checkup(checkup),
                    None => MedicalCheckupForm::new(*today),
                });
                is_submitting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_submit = {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let editing_id = props.editing.as_ref().map(|c| c.id);
        let api_client = props.api_client.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let submission = match editing_id {
                Some(id) => form.to_update_input(id).map(Submission::Update),
                None => form.to_create_input().map(Submission::Create),
            };
            let submission = match submission {
                Ok(submission) => submission,
                Err(e) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
            };

            is_submitting.set(true);
            error_message.set(None);

            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let api_client = api_client.clone();
            let on_success = on_success.clone();

            spawn_local(async move {
                let result = match submission {
                    Submission::Create(input) => api_client.create_medical_checkup(&input).await,
                    Submission::Update(input) => api_client.update_medical_checkup(&input).await,
                };

                is_submitting.set(false);
                match result {
                    Ok(checkup) => on_success.emit(checkup),
                    Err(e) => {
                        gloo::console::error!("Failed to save checkup:", e.clone());
                        error_message.set(Some(format!("Failed to save checkup: {}", e)));
                    }
                }
            });
        })
    };

    let on_patient_change = {
        let form = form.clone();
        Callback::from(move |patient_id: Option<i64>| {
            form.set(MedicalCheckupForm {
                patient_id,
                ..(*form).clone()
            });
        })
    };

    if !props.is_open {
        return html! {};
    }

    let (title, submit_label) = if props.editing.is_some() {
        ("Edit Medical Checkup", "Save Changes")
    } else {
        ("Record Medical Checkup", "Save Checkup")
    };

    html! {
        <Modal title={title} on_close={props.on_close.clone()}>
            <FormErrorMessage error={(*error_message).clone()} />
            <form class="record-form" onsubmit={on_submit}>
                <PatientSelect
                    patients={props.patients.clone()}
                    value={form.patient_id}
                    on_change={on_patient_change}
                    disabled={*is_submitting}
                />
                <div class="form-row">
                    <TextField
                        id="checkup-date"
                        label="Checkup Date"
                        input_type="date"
                        value={form.checkup_date.clone()}
                        on_change={bind(&form, |f, v| f.checkup_date = v)}
                        required=true
                        disabled={*is_submitting}
                    />
                    <SelectField
                        id="checkup-type"
                        label="Checkup Type"
                        options={enum_options(CheckupType::ALL, CheckupType::as_str, CheckupType::label)}
                        value={form.checkup_type.as_str()}
                        on_change={bind(&form, |f, v| {
                            if let Ok(checkup_type) = v.parse() {
                                f.checkup_type = checkup_type;
                            }
                        })}
                        disabled={*is_submitting}
                    />
                </div>
                <div class="form-row">
                    <TextField
                        id="checkup-weight"
                        label="Weight (kg)"
                        input_type="number"
                        step="0.01"
                        value={form.weight.clone()}
                        on_change={bind(&form, |f, v| f.weight = v)}
                        disabled={*is_submitting}
                    />
                    <TextField
                        id="checkup-height"
                        label="Height (cm)"
                        input_type="number"
                        step="0.01"
                        value={form.height.clone()}
                        on_change={bind(&form, |f, v| f.height = v)}
                        disabled={*is_submitting}
                    />
                </div>
                <div class="form-row">
                    <TextField
                        id="checkup-blood-pressure"
                        label="Blood Pressure"
                        placeholder="120/80"
                        value={form.blood_pressure.clone()}
                        on_change={bind(&form, |f, v| f.blood_pressure = v)}
                        disabled={*is_submitting}
                    />
                    <TextField
                        id="checkup-temperature"
                        label="Temperature (°C)"
                        input_type="number"
                        step="0.1"
                        value={form.temperature.clone()}
                        on_change={bind(&form, |f, v| f.temperature = v)}
                        disabled={*is_submitting}
                    />
                    <TextField
                        id="checkup-heart-rate"
                        label="Heart Rate (bpm)"
                        input_type="number"
                        step="1"
                        value={form.heart_rate.clone()}
                        on_change={bind(&form, |f, v| f.heart_rate = v)}
                        disabled={*is_submitting}
                    />
                </div>
                <TextAreaField
                    id="checkup-symptoms"
                    label="Symptoms"
                    value={form.symptoms.clone()}
                    on_change={bind(&form, |f, v| f.symptoms = v)}
                    disabled={*is_submitting}
                />
                <TextAreaField
                    id="checkup-diagnosis"
                    label="Diagnosis"
                    value={form.diagnosis.clone()}
                    on_change={bind(&form, |f, v| f.diagnosis = v)}
                    disabled={*is_submitting}
                />
                <TextAreaField
                    id="checkup-treatment"
                    label="Treatment"
                    value={form.treatment.clone()}
                    on_change={bind(&form, |f, v| f.treatment = v)}
                    disabled={*is_submitting}
                />
                <TextAreaField
                    id="checkup-medication"
                    label="Medication Prescribed"
                    value={form.medication_prescribed.clone()}
                    on_change={bind(&form, |f, v| f.medication_prescribed = v)}
                    disabled={*is_submitting}
                />
                <div class="form-row">
                    <TextField
                        id="checkup-doctor"
                        label="Doctor"
                        value={form.doctor_name.clone()}
                        on_change={bind(&form, |f, v| f.doctor_name = v)}
                        required=true
                        disabled={*is_submitting}
                    />
                    <TextField
                        id="checkup-next-date"
                        label="Next Checkup"
                        input_type="date"
                        value={form.next_checkup_date.clone()}
                        on_change={bind(&form, |f, v| f.next_checkup_date = v)}
                        disabled={*is_submitting}
                    />
                </div>
                <TextAreaField
                    id="checkup-notes"
                    label="Notes"
                    value={form.notes.clone()}
                    on_change={bind(&form, |f, v| f.notes = v)}
                    disabled={*is_submitting}
                />
                <ModalButtons
                    submit_label={submit_label}
                    is_submitting={*is_submitting}
                    on_cancel={props.on_close.clone()}
                />
            </form>
        </Modal>
    }
}
