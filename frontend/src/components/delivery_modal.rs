use chrono::NaiveDate;
use shared::forms::DeliveryServiceForm;
use shared::{DeliveryService, DeliveryType, Gender, Patient};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::forms::bind;
use super::forms::fields::{
    enum_options, FormErrorMessage, PatientSelect, SelectField, TextAreaField, TextField,
};
use super::modal::{Modal, ModalButtons};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct DeliveryModalProps {
    pub is_open: bool,
    pub patients: Vec<Patient>,
    pub today: NaiveDate,
    pub api_client: ApiClient,
    pub on_success: Callback<DeliveryService>,
    pub on_close: Callback<()>,
}

#[function_component(DeliveryModal)]
pub fn delivery_modal(props: &DeliveryModalProps) -> Html {
    let form = use_state(|| DeliveryServiceForm::new(props.today));
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with((props.is_open, props.today), {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |(is_open, today)| {
            if *is_open {
                form.set(DeliveryServiceForm::new(*today));
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
                let result = api_client.create_delivery_service(&input).await;
                is_submitting.set(false);

                match result {
                    Ok(delivery) => on_success.emit(delivery),
                    Err(e) => {
                        gloo::console::error!("Failed to record delivery:", e.clone());
                        error_message.set(Some(format!("Failed to record delivery: {}", e)));
                    }
                }
            });
        })
    };

    let on_patient_change = {
        let form = form.clone();
        Callback::from(move |patient_id: Option<i64>| {
            form.set(DeliveryServiceForm {
                patient_id,
                ..(*form).clone()
            });
        })
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <Modal title="Record Delivery" on_close={props.on_close.clone()}>
            <FormErrorMessage error={(*error_message).clone()} />
            <form class="record-form" onsubmit={on_submit}>
                <PatientSelect
                    patients={props.patients.clone()}
                    value={form.patient_id}
                    on_change={on_patient_change}
                    disabled={*is_submitting}
                />
                <TextField
                    id="delivery-date"
                    label="Delivery Date"
                    input_type="date"
                    value={form.delivery_date.clone()}
                    on_change={bind(&form, |f, v| f.delivery_date = v)}
                    required=true
                    disabled={*is_submitting}
                />
                <SelectField
                    id="delivery-type"
                    label="Delivery Type"
                    options={enum_options(DeliveryType::ALL, DeliveryType::as_str, DeliveryType::label)}
                    value={form.delivery_type.as_str()}
                    on_change={bind(&form, |f, v| {
                        if let Ok(delivery_type) = v.parse() {
                            f.delivery_type = delivery_type;
                        }
                    })}
                    disabled={*is_submitting}
                />
                <TextField
                    id="delivery-baby-weight"
                    label="Baby Weight (kg)"
                    input_type="number"
                    step="0.01"
                    value={form.baby_weight.clone()}
                    on_change={bind(&form, |f, v| f.baby_weight = v)}
                    required=true
                    disabled={*is_submitting}
                />
                <SelectField
                    id="delivery-baby-gender"
                    label="Baby Gender"
                    options={enum_options(Gender::ALL, Gender::as_str, Gender::label)}
                    value={form.baby_gender.as_str()}
                    on_change={bind(&form, |f, v| {
                        if let Ok(gender) = v.parse() {
                            f.baby_gender = gender;
                        }
                    })}
                    disabled={*is_submitting}
                />
                <TextField
                    id="delivery-baby-name"
                    label="Baby Name"
                    value={form.baby_name.clone()}
                    on_change={bind(&form, |f, v| f.baby_name = v)}
                    disabled={*is_submitting}
                />
                <TextField
                    id="delivery-doctor"
                    label="Doctor"
                    value={form.doctor_name.clone()}
                    on_change={bind(&form, |f, v| f.doctor_name = v)}
                    required=true
                    disabled={*is_submitting}
                />
                <TextAreaField
                    id="delivery-complications"
                    label="Complications"
                    value={form.complications.clone()}
                    on_change={bind(&form, |f, v| f.complications = v)}
                    disabled={*is_submitting}
                />
                <TextAreaField
                    id="delivery-notes"
                    label="Notes"
                    value={form.notes.clone()}
                    on_change={bind(&form, |f, v| f.notes = v)}
                    disabled={*is_submitting}
                />
                <ModalButtons
                    submit_label="Save Delivery"
                    is_submitting={*is_submitting}
                    on_cancel={props.on_close.clone()}
                />
            </form>
        </Modal>
    }
}
