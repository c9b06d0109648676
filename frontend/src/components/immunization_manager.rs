use chrono::NaiveDate;
use shared::display::{format_date, patient_name};
use shared::{Immunization, Patient};
use yew::prelude::*;

use super::immunization_modal::ImmunizationModal;
use super::record_list::{follow_up_cell, list_placeholder, optional_text};
use crate::hooks::use_records::RecordList;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ImmunizationManagerProps {
    pub immunizations: RecordList<Immunization>,
    pub patients: Vec<Patient>,
    pub today: NaiveDate,
    pub api_client: ApiClient,
    pub on_saved: Callback<Immunization>,
}

#[function_component(ImmunizationManager)]
pub fn immunization_manager(props: &ImmunizationManagerProps) -> Html {
    let is_open = use_state(|| false);

    let on_create = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(true))
    };

    let on_close = {
        let is_open = is_open.clone();
        Callback::from(move |_: ()| is_open.set(false))
    };

    let on_success = {
        let is_open = is_open.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |immunization: Immunization| {
            on_saved.emit(immunization);
            is_open.set(false);
        })
    };

    let rows = props.immunizations.items.iter().map(|immunization| {
        html! {
            <tr key={immunization.id}>
                <td>{patient_name(&props.patients, immunization.patient_id)}</td>
                <td>{&immunization.vaccine_name}</td>
                <td>{immunization.vaccine_type.label()}</td>
                <td>{format_date(immunization.vaccination_date)}</td>
                <td>{follow_up_cell(immunization.next_vaccination_date, props.today)}</td>
                <td>{optional_text(&immunization.batch_number)}</td>
                <td>{&immunization.administered_by}</td>
                <td>{optional_text(&immunization.side_effects)}</td>
            </tr>
        }
    });

    html! {
        <section class="manager">
            <div class="manager-header">
                <h2>{"Immunizations"}</h2>
                <button
                    class="btn btn-primary"
                    onclick={on_create}
                    disabled={props.patients.is_empty()}
                    title={props.patients.is_empty().then_some("Register a patient first")}
                >
                    {"Record Immunization"}
                </button>
            </div>

            {match list_placeholder(&props.immunizations, "No immunizations recorded yet") {
                Some(placeholder) => placeholder,
                None => html! {
                    <table class="record-table">
                        <thead>
                            <tr>
                                <th>{"Patient"}</th>
                                <th>{"Vaccine"}</th>
                                <th>{"Type"}</th>
                                <th>{"Given"}</th>
                                <th>{"Next Dose"}</th>
                                <th>{"Batch"}</th>
                                <th>{"Administered By"}</th>
                                <th>{"Side Effects"}</th>
                            </tr>
                        </thead>
                        <tbody>{for rows}</tbody>
                    </table>
                },
            }}

            <ImmunizationModal
                is_open={*is_open}
                patients={props.patients.clone()}
                today={props.today}
                api_client={props.api_client.clone()}
                on_success={on_success}
                on_close={on_close}
            />
        </section>
    }
}
