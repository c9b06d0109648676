//! Labelled inputs shared by the record dialogs. Every field reports its new
//! value as a `String`; the dialogs keep string-backed form state.

use shared::{display::format_date, Patient};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub step: Option<AttrValue>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div class="form-group">
            <label for={props.id.clone()}>
                {props.label.clone()}
                {if props.required { html! { <span class="required">{" *"}</span> } } else { html! {} }}
            </label>
            <input
                id={props.id.clone()}
                type={props.input_type.clone()}
                class="form-input"
                placeholder={props.placeholder.clone()}
                step={props.step.clone()}
                value={props.value.clone()}
                onchange={onchange}
                required={props.required}
                disabled={props.disabled}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextAreaFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextAreaField)]
pub fn text_area_field(props: &TextAreaFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <textarea
                id={props.id.clone()}
                class="form-input"
                rows="2"
                value={props.value.clone()}
                onchange={onchange}
                disabled={props.disabled}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    /// `(value, label)` pairs
    pub options: Vec<(AttrValue, AttrValue)>,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <select
                id={props.id.clone()}
                class="form-input"
                onchange={onchange}
                disabled={props.disabled}
            >
                {for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == props.value}>
                        {label.clone()}
                    </option>
                })}
            </select>
        </div>
    }
}

/// Options for a select over one of the shared enums
pub fn enum_options<T: Copy>(
    all: &[T],
    as_str: fn(&T) -> &'static str,
    label: fn(&T) -> &'static str,
) -> Vec<(AttrValue, AttrValue)> {
    all.iter()
        .map(|v| (AttrValue::Static(as_str(v)), AttrValue::Static(label(v))))
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct PatientSelectProps {
    pub patients: Vec<Patient>,
    pub value: Option<i64>,
    pub on_change: Callback<Option<i64>>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Patient picker used by the clinical event dialogs
#[function_component(PatientSelect)]
pub fn patient_select(props: &PatientSelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value().parse::<i64>().ok());
        })
    };

    html! {
        <div class="form-group">
            <label for="patient-select">
                {"Patient"}<span class="required">{" *"}</span>
            </label>
            <select
                id="patient-select"
                class="form-input"
                onchange={onchange}
                disabled={props.disabled}
            >
                <option value="" selected={props.value.is_none()}>{"Select a patient"}</option>
                {for props.patients.iter().map(|patient| html! {
                    <option
                        value={patient.id.to_string()}
                        selected={props.value == Some(patient.id)}
                    >
                        {format!("{} (born {})", patient.name, format_date(patient.date_of_birth))}
                    </option>
                })}
            </select>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormErrorProps {
    pub error: Option<String>,
}

#[function_component(FormErrorMessage)]
pub fn form_error_message(props: &FormErrorProps) -> Html {
    match &props.error {
        Some(error) => html! { <div class="form-message error">{error}</div> },
        None => html! {},
    }
}
