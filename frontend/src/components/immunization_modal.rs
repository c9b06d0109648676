use chrono::NaiveDate;
use shared::forms::ImmunizationForm;
use shared::{Immunization, Patient, VaccineType};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::forms::bind;
use super::forms::fields::{
    enum_options, FormErrorMessage, PatientSelect, SelectField, TextAreaField, TextField,
};
use super::modal::{Modal, ModalButtons};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ImmunizationModalProps {
    pub is_open: bool,
    pub patients: Vec<Patient>,
    pub today: NaiveDate,
    pub api_client: ApiClient,
    pub on_success: Callback<Immunization>,
    pub on_close: Callback<()>,
}

#[function_component(ImmunizationModal)]
pub fn immunization_modal(props: &ImmunizationModalProps) -> Html {
    let form = use_state(|| ImmunizationForm::new(props.today));
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with((props.is_open, props.today), {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |(is_open, today)| {
            if *is_open {
                form.set(ImmunizationForm::new(*today));
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
        let api_client = props.api_client.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let input = match form.to_create_input() {
                Ok(input) => input,
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
                let result = api_client.create_immunization(&input).await;
                is_submitting.set(false);

                match result {
                    Ok(immunization) => on_success.emit(immunization),
                    Err(e) => {
                        gloo::console::error!("Failed to record immunization:", e.clone());
                        error_message.set(Some(format!("Failed to record immunization: {}", e)));
                    }
                }
            });
        })
    };

    let on_patient_change = {
        let form = form.clone();
        Callback::from(move |patient_id: Option<i64>| {
            form.set(ImmunizationForm {
                patient_id,
                ..(*form).clone()
            });
        })
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <Modal title="Record Immunization" on_close={props.on_close.clone()}>
            <FormErrorMessage error={(*error_message).clone()} />
            <form class="record-form" onsubmit={on_submit}>
                <PatientSelect
                    patients={props.patients.clone()}
                    value={form.patient_id}
                    on_change={on_patient_change}
                    disabled={*is_submitting}
                />
                <TextField
                    id="immunization-vaccine"
                    label="Vaccine"
                    value={form.vaccine_name.clone()}
                    on_change={bind(&form, |f, v| f.vaccine_name = v)}
                    placeholder="e.g. BCG, Polio 1, DPT-HB-Hib 1"
                    required=true
                    disabled={*is_submitting}
                />
                <SelectField
                    id="immunization-type"
                    label="Vaccine Type"
                    options={enum_options(VaccineType::ALL, VaccineType::as_str, VaccineType::label)}
                    value={form.vaccine_type.as_str()}
                    on_change={bind(&form, |f, v| {
                        if let Ok(vaccine_type) = v.parse() {
                            f.vaccine_type = vaccine_type;
                        }
                    })}
                    disabled={*is_submitting}
                />
                <TextField
                    id="immunization-date"
                    label="Vaccination Date"
                    input_type="date"
                    value={form.vaccination_date.clone()}
                    on_change={bind(&form, |f, v| f.vaccination_date = v)}
                    required=true
                    disabled={*is_submitting}
                />
                <TextField
                    id="immunization-next-date"
                    label="Next Vaccination"
                    input_type="date"
                    value={form.next_vaccination_date.clone()}
                    on_change={bind(&form, |f, v| f.next_vaccination_date = v)}
                    disabled={*is_submitting}
                />
                <TextField
                    id="immunization-batch"
                    label="Batch Number"
                    value={form.batch_number.clone()}
                    on_change={bind(&form, |f, v| f.batch_number = v)}
                    disabled={*is_submitting}
                />
                <TextField
                    id="immunization-administered-by"
                    label="Administered By"
                    value={form.administered_by.clone()}
                    on_change={bind(&form, |f, v| f.administered_by = v)}
                    required=true
                    disabled={*is_submitting}
                />
                <TextAreaField
                    id="immunization-side-effects"
                    label="Side Effects"
                    value={form.side_effects.clone()}
                    on_change={bind(&form, |f, v| f.side_effects = v)}
                    disabled={*is_submitting}
                />
                <TextAreaField
                    id="immunization-notes"
                    label="Notes"
                    value={form.notes.clone()}
                    on_change={bind(&form, |f, v| f.notes = v)}
                    disabled={*is_submitting}
                />
                <ModalButtons
                    submit_label="Save Immunization"
                    is_submitting={*is_submitting}
                    on_cancel={props.on_close.clone()}
                />
            </form>
        </Modal>
    }
}
