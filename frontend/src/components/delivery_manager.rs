use chrono::NaiveDate;
use shared::display::{format_date, patient_name};
use shared::{DeliveryService, Patient};
use yew::prelude::*;

use super::delivery_modal::DeliveryModal;
use super::record_list::{list_placeholder, optional_text};
use crate::hooks::use_records::RecordList;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct DeliveryManagerProps {
    pub deliveries: RecordList<DeliveryService>,
    pub patients: Vec<Patient>,
    pub today: NaiveDate,
    pub api_client: ApiClient,
    pub on_saved: Callback<DeliveryService>,
}

#[function_component(DeliveryManager)]
pub fn delivery_manager(props: &DeliveryManagerProps) -> Html {
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
        Callback::from(move |delivery: DeliveryService| {
            on_saved.emit(delivery);
            is_open.set(false);
        })
    };

    let rows = props.deliveries.items.iter().map(|delivery| {
        html! {
            <tr key={delivery.id}>
                <td>{patient_name(&props.patients, delivery.patient_id)}</td>
                <td>{format_date(delivery.delivery_date)}</td>
                <td>{delivery.delivery_type.label()}</td>
                <td>{format!("{} kg", delivery.baby_weight)}</td>
                <td>{delivery.baby_gender.label()}</td>
                <td>{optional_text(&delivery.baby_name)}</td>
                <td>{&delivery.doctor_name}</td>
                <td>{optional_text(&delivery.complications)}</td>
            </tr>
        }
    });

    html! {
        <section class="manager">
            <div class="manager-header">
                <h2>{"Deliveries"}</h2>
                <button
                    class="btn btn-primary"
                    onclick={on_create}
                    disabled={props.patients.is_empty()}
                    title={props.patients.is_empty().then_some("Register a patient first")}
                >
                    {"Record Delivery"}
                </button>
            </div>

            {match list_placeholder(&props.deliveries, "No deliveries recorded yet") {
                Some(placeholder) => placeholder,
                None => html! {
                    <table class="record-table">
                        <thead>
                            <tr>
                                <th>{"Mother"}</th>
                                <th>{"Date"}</th>
                                <th>{"Type"}</th>
                                <th>{"Baby Weight"}</th>
                                <th>{"Baby Gender"}</th>
                                <th>{"Baby Name"}</th>
                                <th>{"Doctor"}</th>
                                <th>{"Complications"}</th>
                            </tr>
                        </thead>
                        <tbody>{for rows}</tbody>
                    </table>
                },
            }}

            <DeliveryModal
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
