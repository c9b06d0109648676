use chrono::NaiveDate;
use shared::display::{follow_up_status, format_date};
use yew::prelude::*;

use crate::hooks::use_records::RecordList;

/// Placeholder shown instead of a table while loading, after a failed
/// first load, or when there is nothing to list
pub fn list_placeholder<T>(list: &RecordList<T>, empty_message: &str) -> Option<Html> {
    if !list.items.is_empty() {
        return None;
    }

    if list.loading {
        Some(html! { <div class="loading">{"Loading..."}</div> })
    } else if let Some(error) = &list.error {
        Some(html! { <div class="list-error">{error}</div> })
    } else {
        Some(html! { <div class="empty-state">{empty_message.to_string()}</div> })
    }
}

/// Next date with a status badge, or a dash when nothing is scheduled
pub fn follow_up_cell(next_date: Option<NaiveDate>, today: NaiveDate) -> Html {
    match next_date {
        Some(date) => {
            let status = follow_up_status(date, today);
            html! {
                <>
                    {format_date(date)}
                    {" "}
                    <span class={classes!("badge", status.css_class())}>{status.label()}</span>
                </>
            }
        }
        None => html! { "-" },
    }
}

pub fn optional_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}
