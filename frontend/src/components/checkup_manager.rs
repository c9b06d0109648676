use chrono::NaiveDate;
use shared::display::{format_date, format_optional, patient_name};
use shared::{MedicalCheckup, Patient};
use yew::prelude::*;

use super::checkup_modal::CheckupModal;
use super::record_list::{follow_up_cell, list_placeholder, optional_text};
use crate::hooks::use_records::RecordList;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct CheckupManagerProps {
    pub checkups: RecordList<MedicalCheckup>,
    pub patients: Vec<Patient>,
    pub today: NaiveDate,
    pub api_client: ApiClient,
    pub on_saved: Callback<MedicalCheckup>,
}

#[derive(Clone, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(MedicalCheckup),
}

fn vitals(checkup: &MedicalCheckup) -> String {
    let mut parts = Vec::new();
    if checkup.weight.is_some() {
        parts.push(format_optional(checkup.weight, "kg"));
    }
    if checkup.height.is_some() {
        parts.push(format_optional(checkup.height, "cm"));
    }
    if let Some(bp) = &checkup.blood_pressure {
        parts.push(format!("BP {}", bp));
    }
    if checkup.temperature.is_some() {
        parts.push(format_optional(checkup.temperature, "°C"));
    }
    if let Some(hr) = checkup.heart_rate {
        parts.push(format!("{} bpm", hr));
    }

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

#[function_component(CheckupManager)]
pub fn checkup_manager(props: &CheckupManagerProps) -> Html {
    let dialog = use_state(|| Dialog::Closed);

    let on_create = {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(Dialog::Create))
    };

    let on_close = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(Dialog::Closed))
    };

    let on_success = {
        let dialog = dialog.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |checkup: MedicalCheckup| {
            on_saved.emit(checkup);
            dialog.set(Dialog::Closed);
        })
    };

    let rows = props.checkups.items.iter().map(|checkup| {
        let on_edit = {
            let dialog = dialog.clone();
            let checkup = checkup.clone();
            Callback::from(move |_: MouseEvent| dialog.set(Dialog::Edit(checkup.clone())))
        };

        html! {
            <tr key={checkup.id}>
                <td>{patient_name(&props.patients, checkup.patient_id)}</td>
                <td>{format_date(checkup.checkup_date)}</td>
                <td>{checkup.checkup_type.label()}</td>
                <td>{vitals(checkup)}</td>
                <td>{optional_text(&checkup.diagnosis)}</td>
                <td>{&checkup.doctor_name}</td>
                <td>{follow_up_cell(checkup.next_checkup_date, props.today)}</td>
                <td class="row-actions">
                    <button class="btn btn-small" onclick={on_edit}>{"Edit"}</button>
                </td>
            </tr>
        }
    });

    let (is_open, editing) = match &*dialog {
        Dialog::Closed => (false, None),
        Dialog::Create => (true, None),
        Dialog::Edit(checkup) => (true, Some(checkup.clone())),
    };

    html! {
        <section class="manager">
            <div class="manager-header">
                <h2>{"Medical Checkups"}</h2>
                <button
                    class="btn btn-primary"
                    onclick={on_create}
                    disabled={props.patients.is_empty()}
                    title={props.patients.is_empty().then_some("Register a patient first")}
                >
                    {"Record Checkup"}
                </button>
            </div>

            {match list_placeholder(&props.checkups, "No checkups recorded yet") {
                Some(placeholder) => placeholder,
                None => html! {
                    <table class="record-table">
                        <thead>
                            <tr>
                                <th>{"Patient"}</th>
                                <th>{"Date"}</th>
                                <th>{"Type"}</th>
                                <th>{"Vitals"}</th>
                                <th>{"Diagnosis"}</th>
                                <th>{"Doctor"}</th>
                                <th>{"Next Checkup"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>{for rows}</tbody>
                    </table>
                },
            }}

            <CheckupModal
                is_open={is_open}
                editing={editing}
                patients={props.patients.clone()}
                today={props.today}
                api_client={props.api_client.clone()}
                on_success={on_success}
                on_close={on_close}
            />
        </section>
    }
}
