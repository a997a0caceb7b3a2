use crate::models::{EditField, Record, RowEdit};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TableError {
    NothingSelected,
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::NothingSelected => {
                write!(f, "Please select at least one row to delete.")
            }
        }
    }
}

/// Which toolbar actions are currently usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct ActionAvailability {
    pub edit: bool,
    pub delete: bool,
}

impl ActionAvailability {
    pub fn for_selection(selected: usize) -> Self {
        Self {
            edit: selected == 1,
            delete: selected >= 1,
        }
    }
}

/// Records whose name/email/date (case-insensitive) or decimal id contain `query`.
///
/// Empty query returns everything in collection order.
pub(crate) fn filter_records(records: &[Record], query: &str) -> Vec<Record> {
    let term = query.to_lowercase();
    if term.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| record_matches(r, &term))
        .cloned()
        .collect()
}

fn record_matches(r: &Record, term: &str) -> bool {
    r.name.to_lowercase().contains(term)
        || r.email.to_lowercase().contains(term)
        || r.date.to_lowercase().contains(term)
        || r.id.to_string().contains(term)
}

/// All table state: the collection, the checked ids and open row drafts.
///
/// The rendered table is a projection of this plus the search query.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TableModel {
    records: Vec<Record>,
    /// Ids in the order they were checked.
    selected: Vec<i64>,
    drafts: BTreeMap<i64, RowEdit>,
}

impl TableModel {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            selected: vec![],
            drafts: BTreeMap::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Replaces the collection, dropping selection and drafts for ids that vanished.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        let records = &self.records;
        self.selected.retain(|id| records.iter().any(|r| r.id == *id));
        self.drafts.retain(|id, _| records.iter().any(|r| r.id == *id));
    }

    pub fn visible(&self, query: &str) -> Vec<Record> {
        filter_records(&self.records, query)
    }

    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn actions(&self) -> ActionAvailability {
        ActionAvailability::for_selection(self.selected.len())
    }

    /// Checkbox toggle. Checking also opens the row for editing; unchecking
    /// discards whatever was typed.
    pub fn set_selected(&mut self, id: i64, checked: bool) {
        if checked {
            if self.record(id).is_none() {
                return;
            }
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
            self.enter_edit(id);
        } else {
            self.selected.retain(|x| *x != id);
            self.exit_edit(id);
        }
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.drafts.contains_key(&id)
    }

    pub fn draft(&self, id: i64) -> Option<&RowEdit> {
        self.drafts.get(&id)
    }

    pub fn enter_edit(&mut self, id: i64) {
        if self.drafts.contains_key(&id) {
            return;
        }
        if let Some(r) = self.record(id) {
            let edit = RowEdit::from_record(r);
            self.drafts.insert(id, edit);
        }
    }

    pub fn update_draft(&mut self, id: i64, field: EditField, value: String) {
        if let Some(d) = self.drafts.get_mut(&id) {
            d.set(field, value);
        }
    }

    pub fn exit_edit(&mut self, id: i64) -> Option<RowEdit> {
        self.drafts.remove(&id)
    }

    /// Closes the row's draft and writes it into the in-memory record.
    ///
    /// Returns the committed values, or None if the row was not being edited.
    pub fn save_row(&mut self, id: i64) -> Option<RowEdit> {
        let edit = self.drafts.remove(&id)?;
        if let Some(r) = self.records.iter_mut().find(|r| r.id == id) {
            edit.apply_to(r);
        }
        Some(edit)
    }

    pub fn cancel_row(&mut self, id: i64) {
        self.drafts.remove(&id);
    }

    /// Toolbar Edit: opens the single selected row. Returns the id when it applied.
    pub fn edit_single_selected(&mut self) -> Option<i64> {
        let &[id] = self.selected.as_slice() else {
            return None;
        };
        self.enter_edit(id);
        Some(id)
    }

    /// Removes every selected record and returns the remaining collection,
    /// which is what gets pushed to the server.
    pub fn delete_selected(&mut self) -> Result<Vec<Record>, TableError> {
        if self.selected.is_empty() {
            return Err(TableError::NothingSelected);
        }

        let selected = std::mem::take(&mut self.selected);
        self.records.retain(|r| !selected.contains(&r.id));
        self.drafts.clear();

        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64, name: &str, email: &str, date: &str) -> Record {
        Record {
            id,
            name: name.to_string(),
            email: email.to_string(),
            date: date.to_string(),
            tags: vec![],
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            rec(1, "Alice", "alice@example.com", "2024-01-01"),
            rec(2, "Bob", "bob@Example.com", "2024-02-14"),
            rec(3, "Carol", "carol@test.org", "2023-12-31"),
            rec(4, "Dave", "dave@test.org", "2024-03-01"),
            rec(5, "Eve", "eve@example.com", "2022-05-05"),
        ]
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_filter_empty_query_returns_everything_in_order() {
        let all = sample();
        assert_eq!(filter_records(&all, ""), all);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = sample();
        for q in ["a", "EXAMPLE", "2024", "1", "zzz", ".org"] {
            let once = filter_records(&all, q);
            let twice = filter_records(&once, q);
            assert_eq!(once, twice, "query {q:?}");
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_on_text_fields() {
        let all = sample();
        assert_eq!(ids(&filter_records(&all, "ALICE")), vec![1]);
        assert_eq!(ids(&filter_records(&all, "example.COM")), vec![1, 2, 5]);
    }

    #[test]
    fn test_filter_matches_id_and_date() {
        let all = sample();
        // "3" hits id 3 and the March date of id 4
        assert_eq!(ids(&filter_records(&all, "3")), vec![3, 4]);
        assert_eq!(ids(&filter_records(&all, "2022")), vec![5]);
        assert!(filter_records(&all, "nobody").is_empty());
    }

    #[test]
    fn test_filter_includes_every_matching_record() {
        let all = sample();
        let q = "test";
        let got = filter_records(&all, q);
        for r in &all {
            let hit = r.email.to_lowercase().contains(q);
            assert_eq!(got.contains(r), hit, "record {}", r.id);
        }
    }

    #[test]
    fn test_actions_follow_selection_size() {
        let mut m = TableModel::new(sample());
        assert_eq!(m.actions(), ActionAvailability { edit: false, delete: false });

        m.set_selected(2, true);
        assert_eq!(m.actions(), ActionAvailability { edit: true, delete: true });

        m.set_selected(4, true);
        assert_eq!(m.actions(), ActionAvailability { edit: false, delete: true });

        m.set_selected(2, false);
        m.set_selected(4, false);
        assert_eq!(m.actions(), ActionAvailability::default());
    }

    #[test]
    fn test_check_opens_draft_and_uncheck_discards_it() {
        let mut m = TableModel::new(sample());
        m.set_selected(1, true);
        assert!(m.is_editing(1));
        assert_eq!(m.draft(1).map(|d| d.name.as_str()), Some("Alice"));

        m.update_draft(1, EditField::Name, "Mallory".to_string());
        m.set_selected(1, false);

        assert!(!m.is_editing(1));
        assert!(!m.is_selected(1));
        assert_eq!(m.record(1).map(|r| r.name.as_str()), Some("Alice"));
    }

    #[test]
    fn test_check_unknown_id_is_ignored() {
        let mut m = TableModel::new(sample());
        m.set_selected(99, true);
        assert!(m.selected().is_empty());
        assert!(!m.is_editing(99));
    }

    #[test]
    fn test_save_commits_draft_and_keeps_selection() {
        let mut m = TableModel::new(sample());
        m.set_selected(3, true);
        m.update_draft(3, EditField::Email, "c@new.org".to_string());

        let saved = m.save_row(3).expect("row 3 was being edited");
        assert_eq!(saved.email, "c@new.org");
        assert!(!m.is_editing(3));
        assert!(m.is_selected(3));
        assert_eq!(m.record(3).map(|r| r.email.as_str()), Some("c@new.org"));

        assert!(m.save_row(3).is_none());
    }

    #[test]
    fn test_cancel_leaves_record_untouched() {
        let mut m = TableModel::new(sample());
        m.set_selected(3, true);
        m.update_draft(3, EditField::Date, "1999-01-01".to_string());
        m.cancel_row(3);

        assert!(!m.is_editing(3));
        assert!(m.is_selected(3));
        assert_eq!(m.record(3).map(|r| r.date.as_str()), Some("2023-12-31"));
    }

    #[test]
    fn test_edit_button_only_applies_to_single_selection() {
        let mut m = TableModel::new(sample());
        assert_eq!(m.edit_single_selected(), None);

        m.set_selected(2, true);
        m.cancel_row(2);
        assert_eq!(m.edit_single_selected(), Some(2));
        assert!(m.is_editing(2));

        m.set_selected(5, true);
        assert_eq!(m.edit_single_selected(), None);
    }

    #[test]
    fn test_delete_selected_removes_rows_and_clears_selection() {
        let mut m = TableModel::new(sample());
        m.set_selected(2, true);
        m.set_selected(5, true);

        let payload = m.delete_selected().expect("selection is non-empty");
        assert_eq!(ids(&payload), vec![1, 3, 4]);
        assert_eq!(ids(m.records()), vec![1, 3, 4]);
        assert!(m.selected().is_empty());
        assert!(!m.is_editing(2));
        assert_eq!(m.actions(), ActionAvailability::default());
    }

    #[test]
    fn test_saved_edit_rides_along_in_next_delete_payload() {
        let mut m = TableModel::new(sample());
        m.set_selected(1, true);
        m.update_draft(1, EditField::Name, "Alicia".to_string());
        m.save_row(1);
        m.set_selected(1, false);

        m.set_selected(5, true);
        let payload = m.delete_selected().expect("selection is non-empty");

        assert_eq!(ids(&payload), vec![1, 2, 3, 4]);
        assert_eq!(payload[0].name, "Alicia");
    }

    #[test]
    fn test_delete_with_nothing_selected_is_an_error() {
        let mut m = TableModel::new(sample());
        assert_eq!(m.delete_selected(), Err(TableError::NothingSelected));
        assert_eq!(m.records().len(), 5);
        assert_eq!(
            TableError::NothingSelected.to_string(),
            "Please select at least one row to delete."
        );
    }

    #[test]
    fn test_search_does_not_touch_collection_or_selection() {
        let mut m = TableModel::new(sample());
        m.set_selected(4, true);
        let view = m.visible("alice");
        assert_eq!(ids(&view), vec![1]);
        assert_eq!(m.records().len(), 5);
        assert!(m.is_selected(4));
        assert!(m.is_editing(4));
    }

    #[test]
    fn test_replace_records_prunes_stale_ids() {
        let mut m = TableModel::new(sample());
        m.set_selected(1, true);
        m.set_selected(2, true);
        m.replace_records(vec![rec(2, "Bob", "b@x.com", "2024-01-01")]);
        assert_eq!(m.selected(), &[2]);
        assert!(!m.is_editing(1));
        assert!(m.is_editing(2));
    }

    #[test]
    fn test_single_record_search_select_uncheck_scenario() {
        let fixture = r#"[{"id":1,"name":"A","email":"a@x.com","date":"2024-01-01","tags":["x"]}]"#;
        let records: Vec<Record> = serde_json::from_str(fixture).expect("fixture should parse");
        let mut m = TableModel::new(records);

        let view = m.visible("a@x");
        assert_eq!(view.len(), 1);

        m.set_selected(1, true);
        assert_eq!(m.draft(1).map(|d| d.get(EditField::Name)), Some("A"));

        m.update_draft(1, EditField::Name, "changed".to_string());
        m.set_selected(1, false);
        assert!(m.draft(1).is_none());
        assert_eq!(m.record(1).map(|r| EditField::Name.read(r)), Some("A"));
    }
}
