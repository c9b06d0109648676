use chrono::Local;
use shared::{DeliveryService, Immunization, MedicalCheckup, Patient};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::checkup_manager::CheckupManager;
use components::delivery_manager::DeliveryManager;
use components::header::Header;
use components::immunization_manager::ImmunizationManager;
use components::patient_detail::PatientDetail;
use components::patient_manager::PatientManager;
use hooks::use_records::use_records;
use services::api::ApiClient;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Patients,
    Deliveries,
    Immunizations,
    Checkups,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Patients, Tab::Deliveries, Tab::Immunizations, Tab::Checkups];

    fn label(&self) -> &'static str {
        match self {
            Tab::Patients => "Patients",
            Tab::Deliveries => "Deliveries",
            Tab::Immunizations => "Immunizations",
            Tab::Checkups => "Checkups",
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    // CLINIC_API_URL at build time points the UI at a non-default backend
    let api_client = (*use_state(|| {
        option_env!("CLINIC_API_URL")
            .map(|url| ApiClient::with_base_url(url.to_string()))
            .unwrap_or_default()
    }))
    .clone();
    let today = Local::now().date_naive();

    let patients = use_records::<Patient>(&api_client);
    let deliveries = use_records::<DeliveryService>(&api_client);
    let immunizations = use_records::<Immunization>(&api_client);
    let checkups = use_records::<MedicalCheckup>(&api_client);

    let active_tab = use_state(|| Tab::Patients);
    let viewing_patient = use_state(|| Option::<i64>::None);

    let on_view_patient = {
        let viewing_patient = viewing_patient.clone();
        Callback::from(move |id: i64| viewing_patient.set(Some(id)))
    };

    let on_close_patient = {
        let viewing_patient = viewing_patient.clone();
        Callback::from(move |_: ()| viewing_patient.set(None))
    };

    let tabs = Tab::ALL.iter().map(|tab| {
        let tab = *tab;
        let count = match tab {
            Tab::Patients => patients.state.items.len(),
            Tab::Deliveries => deliveries.state.items.len(),
            Tab::Immunizations => immunizations.state.items.len(),
            Tab::Checkups => checkups.state.items.len(),
        };
        let onclick = {
            let active_tab = active_tab.clone();
            Callback::from(move |_: MouseEvent| active_tab.set(tab))
        };

        html! {
            <button
                class={classes!("tab", (*active_tab == tab).then_some("tab-active"))}
                onclick={onclick}
            >
                {format!("{} ({})", tab.label(), count)}
            </button>
        }
    });

    let on_refresh = {
        let reloads = [
            patients.actions.reload.clone(),
            deliveries.actions.reload.clone(),
            immunizations.actions.reload.clone(),
            checkups.actions.reload.clone(),
        ];
        Callback::from(move |_: MouseEvent| {
            for reload in &reloads {
                reload.emit(());
            }
        })
    };

    let patient_list = patients.state.items.clone();

    let content = match *active_tab {
        Tab::Patients => html! {
            <PatientManager
                patients={(*patients.state).clone()}
                today={today}
                api_client={api_client.clone()}
                on_saved={patients.actions.saved.clone()}
                on_view={on_view_patient}
            />
        },
        Tab::Deliveries => html! {
            <DeliveryManager
                deliveries={(*deliveries.state).clone()}
                patients={patient_list}
                today={today}
                api_client={api_client.clone()}
                on_saved={deliveries.actions.saved.clone()}
            />
        },
        Tab::Immunizations => html! {
            <ImmunizationManager
                immunizations={(*immunizations.state).clone()}
                patients={patient_list}
                today={today}
                api_client={api_client.clone()}
                on_saved={immunizations.actions.saved.clone()}
            />
        },
        Tab::Checkups => html! {
            <CheckupManager
                checkups={(*checkups.state).clone()}
                patients={patient_list}
                today={today}
                api_client={api_client.clone()}
                on_saved={checkups.actions.saved.clone()}
            />
        },
    };

    html! {
        <>
            <Header
                api_client={api_client.clone()}
                patient_count={patients.state.items.len()}
                delivery_count={deliveries.state.items.len()}
                immunization_count={immunizations.state.items.len()}
                checkup_count={checkups.state.items.len()}
            />

            <main class="main">
                <div class="container">
                    <nav class="tabs">
                        {for tabs}
                        <button class="tab tab-refresh" onclick={on_refresh}>{"Refresh"}</button>
                    </nav>
                    {content}
                </div>
            </main>

            {if let Some(patient_id) = *viewing_patient {
                html! {
                    <PatientDetail
                        patient_id={patient_id}
                        today={today}
                        api_client={api_client.clone()}
                        on_close={on_close_patient}
                    />
                }
            } else {
                html! {}
            }}
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
