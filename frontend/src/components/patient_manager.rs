use chrono::NaiveDate;
use shared::display::{age_on, format_date};
use shared::Patient;
use yew::prelude::*;

use super::patient_modal::PatientModal;
use super::record_list::{list_placeholder, optional_text};
use crate::hooks::use_records::RecordList;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct PatientManagerProps {
    pub patients: RecordList<Patient>,
    pub today: NaiveDate,
    pub api_client: ApiClient,
    pub on_saved: Callback<Patient>,
    /// Open the history of one patient
    pub on_view: Callback<i64>,
}

#[derive(Clone, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(Patient),
}

#[function_component(PatientManager)]
pub fn patient_manager(props: &PatientManagerProps) -> Html {
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
        Callback::from(move |patient: Patient| {
            on_saved.emit(patient);
            dialog.set(Dialog::Closed);
        })
    };

    let rows = props.patients.items.iter().map(|patient| {
        let on_edit = {
            let dialog = dialog.clone();
            let patient = patient.clone();
            Callback::from(move |_: MouseEvent| dialog.set(Dialog::Edit(patient.clone())))
        };
        let on_view = {
            let on_view = props.on_view.clone();
            let id = patient.id;
            Callback::from(move |_: MouseEvent| on_view.emit(id))
        };

        html! {
            <tr key={patient.id}>
                <td>{&patient.name}</td>
                <td>{format!("{} years", age_on(patient.date_of_birth, props.today))}</td>
                <td>{patient.gender.label()}</td>
                <td>{optional_text(&patient.phone)}</td>
                <td>{optional_text(&patient.address)}</td>
                <td>{format_date(patient.created_at.date_naive())}</td>
                <td class="row-actions">
                    <button class="btn btn-small" onclick={on_view}>{"History"}</button>
                    <button class="btn btn-small" onclick={on_edit}>{"Edit"}</button>
                </td>
            </tr>
        }
    });

    let (is_open, editing) = match &*dialog {
        Dialog::Closed => (false, None),
        Dialog::Create => (true, None),
        Dialog::Edit(patient) => (true, Some(patient.clone())),
    };

    html! {
        <section class="manager">
            <div class="manager-header">
                <h2>{"Patients"}</h2>
                <button class="btn btn-primary" onclick={on_create}>{"Register Patient"}</button>
            </div>

            {match list_placeholder(&props.patients, "No patients registered yet") {
                Some(placeholder) => placeholder,
                None => html! {
                    <table class="record-table">
                        <thead>
                            <tr>
                                <th>{"Name"}</th>
                                <th>{"Age"}</th>
                                <th>{"Gender"}</th>
                                <th>{"Phone"}</th>
                                <th>{"Address"}</th>
                                <th>{"Registered"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>{for rows}</tbody>
                    </table>
                },
            }}

            <PatientModal
                is_open={is_open}
                editing={editing}
                api_client={props.api_client.clone()}
                on_success={on_success}
                on_close={on_close}
            />
        </section>
    }
}
