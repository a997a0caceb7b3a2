use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the table.
///
/// `id` is the identity; every other field is a display attribute that may be
/// edited in place.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Record {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The inline-editable columns, in render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum EditField {
    Name,
    Email,
    Date,
}

impl EditField {
    pub const ALL: [EditField; 3] = [EditField::Name, EditField::Email, EditField::Date];

    /// Field name as it appears in the JSON payload.
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn read(self, record: &Record) -> &str {
        match self {
            EditField::Name => &record.name,
            EditField::Email => &record.email,
            EditField::Date => &record.date,
        }
    }

    fn write(self, record: &mut Record, value: String) {
        match self {
            EditField::Name => record.name = value,
            EditField::Email => record.email = value,
            EditField::Date => record.date = value,
        }
    }
}

/// In-progress input values for a row in edit mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RowEdit {
    pub name: String,
    pub email: String,
    pub date: String,
}

impl RowEdit {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            date: record.date.clone(),
        }
    }

    pub fn get(&self, field: EditField) -> &str {
        match field {
            EditField::Name => &self.name,
            EditField::Email => &self.email,
            EditField::Date => &self.date,
        }
    }

    pub fn set(&mut self, field: EditField, value: String) {
        match field {
            EditField::Name => self.name = value,
            EditField::Email => self.email = value,
            EditField::Date => self.date = value,
        }
    }

    /// Field name -> typed value, the shape that gets logged on save.
    pub fn to_field_map(&self) -> BTreeMap<&'static str, String> {
        EditField::ALL
            .iter()
            .map(|f| (f.key(), self.get(*f).to_string()))
            .collect()
    }

    pub fn apply_to(&self, record: &mut Record) {
        for f in EditField::ALL {
            f.write(record, self.get(f).to_string());
        }
    }
}
