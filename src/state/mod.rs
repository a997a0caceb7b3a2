pub(crate) mod controller;

use crate::api::ApiClient;
use crate::table::TableModel;
use leptos::prelude::*;

pub(crate) use controller::TableController;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Collection, selection and open drafts.
    pub table: RwSignal<TableModel>,

    pub records_loading: RwSignal<bool>,

    /// Guards against a stale load response overwriting newer data.
    pub records_request_id: RwSignal<u64>,

    /// Number of sync POSTs started this session.
    pub syncs_started: RwSignal<u64>,

    /// Search box text (raw, not lowercased).
    pub search_query: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_client(ApiClient::from_env())
    }

    pub fn with_client(api_client: ApiClient) -> Self {
        Self {
            api_client: RwSignal::new(api_client),
            table: RwSignal::new(TableModel::default()),
            records_loading: RwSignal::new(false),
            records_request_id: RwSignal::new(0),
            syncs_started: RwSignal::new(0),
            search_query: RwSignal::new(String::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
