use crate::models::{EditField, Record};
use crate::state::AppContext;
use crate::table::{ActionAvailability, TableModel};
use crate::util::alert;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Owns every table interaction: the initial load, checkbox toggles, row
/// editing, search and delete-with-sync.
///
/// Handlers run synchronously on the UI thread; only the load and the sync
/// POST are async, and the sync never touches table state when it resolves.
#[derive(Clone, Copy)]
pub(crate) struct TableController {
    app_state: AppContext,
}

impl TableController {
    pub fn new(app_state: AppContext) -> Self {
        Self { app_state }
    }

    fn table(&self) -> RwSignal<TableModel> {
        self.app_state.0.table
    }

    /// Fetches the collection once. Failures are logged and the table stays empty.
    pub fn load_records(&self) {
        let s = &self.app_state.0;

        let req_id = s.records_request_id.get_untracked().saturating_add(1);
        s.records_request_id.set(req_id);
        s.records_loading.set(true);

        let api_client = s.api_client.get_untracked();
        let s = *s;
        spawn_local(async move {
            let result = api_client.load_records().await;

            if s.records_request_id.get_untracked() != req_id {
                return;
            }

            match result {
                Ok(records) => {
                    log!("[table] loaded {} records", records.len());
                    s.table.update(|t| t.replace_records(records));
                }
                Err(e) => {
                    error!("[table] error loading records ({:?}): {}", e.kind, e);
                }
            }
            s.records_loading.set(false);
        });
    }

    /// Rows to render for the current search text. Tracked.
    pub fn visible_records(&self) -> Vec<Record> {
        let query = self.app_state.0.search_query.get();
        self.table().with(|t| t.visible(&query))
    }

    pub fn set_search_query(&self, query: String) {
        self.app_state.0.search_query.set(query);
    }

    pub fn actions(&self) -> ActionAvailability {
        self.table().with(|t| t.actions())
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.table().with(|t| t.is_selected(id))
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.table().with(|t| t.is_editing(id))
    }

    /// Current text for a cell: the draft while editing, otherwise the record.
    pub fn cell_text(&self, id: i64, field: EditField) -> String {
        self.table().with(|t| {
            t.draft(id)
                .map(|d| d.get(field).to_string())
                .or_else(|| t.record(id).map(|r| field.read(r).to_string()))
                .unwrap_or_default()
        })
    }

    pub fn toggle_row(&self, id: i64, checked: bool) {
        self.table().update(|t| t.set_selected(id, checked));
    }

    pub fn edit_selected(&self) {
        self.table().update(|t| {
            t.edit_single_selected();
        });
    }

    pub fn update_draft(&self, id: i64, field: EditField, value: String) {
        self.table().update(|t| t.update_draft(id, field, value));
    }

    pub fn save_row(&self, id: i64) {
        let saved = self.table().try_update(|t| t.save_row(id)).flatten();
        if let Some(edit) = saved {
            log!("[table] updated data for row {}: {:?}", id, edit.to_field_map());
        }
    }

    pub fn cancel_row(&self, id: i64) {
        self.table().update(|t| t.cancel_row(id));
    }

    /// Deletes the checked rows and posts what is left. Nothing checked means
    /// an alert and no state change.
    ///
    /// Returns the payload handed to the sync POST, if one was started.
    pub fn delete_selected(&self) -> Option<Vec<Record>> {
        let result = self.table().try_update(|t| t.delete_selected())?;

        match result {
            Ok(remaining) => {
                self.sync_records(remaining.clone());
                Some(remaining)
            }
            Err(e) => {
                alert(&e.to_string());
                None
            }
        }
    }

    fn sync_records(&self, records: Vec<Record>) {
        let s = self.app_state.0;
        let sync_id = s.syncs_started.get_untracked().saturating_add(1);
        s.syncs_started.set(sync_id);

        let api_client = s.api_client.get_untracked();
        spawn_local(async move {
            match api_client.sync_records(&records).await {
                Ok(reply) => log!("[table] sync #{} data updated on server: {}", sync_id, reply),
                Err(e) => error!(
                    "[table] sync #{} error updating data on server ({:?}): {}",
                    sync_id, e.kind, e
                ),
            }
        });
    }
}
