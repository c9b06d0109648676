use shared::forms::PatientForm;
use shared::{CreatePatientInput, Gender, Patient, UpdatePatientInput};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::forms::bind;
use super::forms::fields::{enum_options, FormErrorMessage, SelectField, TextAreaField, TextField};
use super::modal::{Modal, ModalButtons};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct PatientModalProps {
    pub is_open: bool,
    /// Patient being edited; `None` registers a new one
    #[prop_or_default]
    pub editing: Option<Patient>,
    pub api_client: ApiClient,
    pub on_success: Callback<Patient>,
    pub on_close: Callback<()>,
}

enum Submission {
    Create(CreatePatientInput),
    Update(UpdatePatientInput),
}

#[function_component(PatientModal)]
pub fn patient_modal(props: &PatientModalProps) -> Html {
    let form = use_state(PatientForm::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    // Reset state when the modal opens
    use_effect_with((props.is_open, props.editing.clone()), {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |(is_open, editing)| {
            if *is_open {
                form.set(editing.as_ref().map(PatientForm::from_patient).unwrap_or_default());
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
        let editing_id = props.editing.as_ref().map(|p| p.id);
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
                    Submission::Create(input) => api_client.create_patient(&input).await,
                    Submission::Update(input) => api_client.update_patient(&input).await,
                };

                is_submitting.set(false);
                match result {
                    Ok(patient) => on_success.emit(patient),
                    Err(e) => {
                        gloo::console::error!("Failed to save patient:", e.clone());
                        error_message.set(Some(format!("Failed to save patient: {}", e)));
                    }
                }
            });
        })
    };

    if !props.is_open {
        return html! {};
    }

    let (title, submit_label) = if props.editing.is_some() {
        ("Edit Patient", "Save Changes")
    } else {
        ("Register Patient", "Register")
    };

    html! {
        <Modal title={title} on_close={props.on_close.clone()}>
            <FormErrorMessage error={(*error_message).clone()} />
            <form class="record-form" onsubmit={on_submit}>
                <TextField
                    id="patient-name"
                    label="Full Name"
                    value={form.name.clone()}
                    on_change={bind(&form, |f, v| f.name = v)}
                    placeholder="Enter the patient's name"
                    required=true
                    disabled={*is_submitting}
                />
                <TextField
                    id="patient-dob"
                    label="Date of Birth"
                    input_type="date"
                    value={form.date_of_birth.clone()}
                    on_change={bind(&form, |f, v| f.date_of_birth = v)}
                    required=true
                    disabled={*is_submitting}
                />
                <SelectField
                    id="patient-gender"
                    label="Gender"
                    options={enum_options(Gender::ALL, Gender::as_str, Gender::label)}
                    value={form.gender.as_str()}
                    on_change={bind(&form, |f, v| {
                        if let Ok(gender) = v.parse() {
                            f.gender = gender;
                        }
                    })}
                    disabled={*is_submitting}
                />
                <TextField
                    id="patient-phone"
                    label="Phone"
                    input_type="tel"
                    value={form.phone.clone()}
                    on_change={bind(&form, |f, v| f.phone = v)}
                    disabled={*is_submitting}
                />
                <TextAreaField
                    id="patient-address"
                    label="Address"
                    value={form.address.clone()}
                    on_change={bind(&form, |f, v| f.address = v)}
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
