use std::rc::Rc;

use shared::{DeliveryService, Immunization, MedicalCheckup, Patient};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// A record type the UI keeps a list of
#[allow(async_fn_in_trait)]
pub trait Record: Clone + PartialEq + 'static {
    /// Plural name used in messages
    const LABEL: &'static str;

    fn id(&self) -> i64;

    async fn fetch_all(api_client: &ApiClient) -> Result<Vec<Self>, String>;
}

impl Record for Patient {
    const LABEL: &'static str = "patients";

    fn id(&self) -> i64 {
        self.id
    }

    async fn fetch_all(api_client: &ApiClient) -> Result<Vec<Self>, String> {
        api_client.get_patients().await
    }
}

impl Record for DeliveryService {
    const LABEL: &'static str = "delivery records";

    fn id(&self) -> i64 {
        self.id
    }

    async fn fetch_all(api_client: &ApiClient) -> Result<Vec<Self>, String> {
        api_client.get_delivery_services().await
    }
}

impl Record for Immunization {
    const LABEL: &'static str = "immunizations";

    fn id(&self) -> i64 {
        self.id
    }

    async fn fetch_all(api_client: &ApiClient) -> Result<Vec<Self>, String> {
        api_client.get_immunizations().await
    }
}

impl Record for MedicalCheckup {
    const LABEL: &'static str = "medical checkups";

    fn id(&self) -> i64 {
        self.id
    }

    async fn fetch_all(api_client: &ApiClient) -> Result<Vec<Self>, String> {
        api_client.get_medical_checkups().await
    }
}

#[derive(Clone, PartialEq)]
pub struct RecordList<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

pub enum RecordListAction<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(String),
    /// Replace the record with the same id, or append it
    Saved(T),
}

impl<T: Record> Reducible for RecordList<T> {
    type Action = RecordListAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            RecordListAction::Loading => next.loading = true,
            RecordListAction::Loaded(items) => {
                next.items = items;
                next.loading = false;
                next.error = None;
            }
            RecordListAction::Failed(error) => {
                next.loading = false;
                next.error = Some(error);
            }
            RecordListAction::Saved(record) => {
                match next.items.iter_mut().find(|item| item.id() == record.id()) {
                    Some(existing) => *existing = record,
                    None => next.items.push(record),
                }
            }
        }
        Rc::new(next)
    }
}

pub struct UseRecordsResult<T: Record> {
    pub state: UseReducerHandle<RecordList<T>>,
    pub actions: UseRecordsActions<T>,
}

#[derive(Clone, PartialEq)]
pub struct UseRecordsActions<T: Record> {
    pub reload: Callback<()>,
    pub saved: Callback<T>,
}

/// Load every record of `T` on mount and keep the list current after mutations
#[hook]
pub fn use_records<T: Record>(api_client: &ApiClient) -> UseRecordsResult<T> {
    let state = use_reducer(RecordList::<T>::default);

    let reload = {
        let api_client = api_client.clone();
        let state = state.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let state = state.clone();

            spawn_local(async move {
                state.dispatch(RecordListAction::Loading);

                match T::fetch_all(&api_client).await {
                    Ok(items) => state.dispatch(RecordListAction::Loaded(items)),
                    Err(e) => {
                        gloo::console::error!(format!("Failed to load {}:", T::LABEL), e.clone());
                        state.dispatch(RecordListAction::Failed(e));
                    }
                }
            });
        })
    };

    let saved = {
        let state = state.clone();
        use_callback((), move |record: T, _| {
            state.dispatch(RecordListAction::Saved(record));
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    UseRecordsResult {
        state,
        actions: UseRecordsActions { reload, saved },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use shared::Gender;
    use yew::functional::Reducible;

    fn patient(id: i64, name: &str) -> Patient {
        let now = Utc::now();
        Patient {
            id,
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: Gender::Male,
            phone: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_saved_replaces_or_appends() {
        let list = Rc::new(RecordList::<Patient>::default());
        let list = list.reduce(RecordListAction::Loaded(vec![patient(1, "Ani"), patient(2, "Budi")]));
        assert!(!list.loading);

        let list = list.reduce(RecordListAction::Saved(patient(2, "Budi Santoso")));
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[1].name, "Budi Santoso");

        let list = list.reduce(RecordListAction::Saved(patient(3, "Citra")));
        let ids: Vec<i64> = list.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let list = Rc::new(RecordList::<Patient>::default());
        let list = list.reduce(RecordListAction::Loaded(vec![patient(1, "Ani")]));
        let list = list.reduce(RecordListAction::Loading);
        let list = list.reduce(RecordListAction::Failed("Network error".to_string()));

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.error.as_deref(), Some("Network error"));
        assert!(!list.loading);
    }
}
