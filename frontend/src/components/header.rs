use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub api_client: ApiClient,
    pub patient_count: usize,
    pub delivery_count: usize,
    pub immunization_count: usize,
    pub checkup_count: usize,
}

#[derive(Clone, Copy, PartialEq)]
enum BackendStatus {
    Checking,
    Connected,
    Unreachable,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let backend_status = use_state(|| BackendStatus::Checking);

    {
        let backend_status = backend_status.clone();
        let api_client = props.api_client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.healthcheck().await {
                    Ok(_) => backend_status.set(BackendStatus::Connected),
                    Err(e) => {
                        gloo::console::warn!("Backend health check failed:", e);
                        backend_status.set(BackendStatus::Unreachable);
                    }
                }
            });
            || ()
        });
    }

    let (status_class, status_label) = match *backend_status {
        BackendStatus::Checking => ("status-checking", "Checking..."),
        BackendStatus::Connected => ("status-ok", "Connected"),
        BackendStatus::Unreachable => ("status-down", "Server unreachable"),
    };

    let summary = [
        ("Patients", props.patient_count),
        ("Deliveries", props.delivery_count),
        ("Immunizations", props.immunization_count),
        ("Checkups", props.checkup_count),
    ];

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Clinic Records"}</h1>
                <div class="header-right">
                    <div class="summary-counts">
                        {for summary.iter().map(|(label, count)| html! {
                            <div class="summary-count">
                                <span class="summary-value">{count.to_string()}</span>
                                <span class="summary-label">{*label}</span>
                            </div>
                        })}
                    </div>
                    <span class={classes!("backend-status", status_class)}>{status_label}</span>
                </div>
            </div>
        </header>
    }
}
