use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

impl Geo {
    /// Parsed `(lat, lng)`; `None` if either part is not a number.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lng = self.lng.trim().parse::<f64>().ok()?;
        Some((lat, lng))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub website: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    Email,
    Website,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Self::Asc => '▲',
            Self::Desc => '▼',
        }
    }
}

/// Editable columns of a row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableColumn {
    Name,
    Email,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: u64,
    pub draft: UserPatch,
}

/// Rows shown by the user table. Edits are applied as given; they do not go
/// through the form validators.
#[derive(Debug, Clone)]
pub struct TableStore {
    rows: Vec<UserRecord>,
    sort: (SortKey, SortDirection),
    edit: Option<EditSession>,
    loading: bool,
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore {
    /// Starts in the loading state with no rows, sorted by id ascending.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            sort: (SortKey::Id, SortDirection::Asc),
            edit: None,
            loading: true,
        }
    }

    pub fn load(&mut self, records: Vec<UserRecord>) {
        self.rows = records;
        self.edit = None;
        self.loading = false;
        self.apply_sort();
    }

    pub fn fail_loading(&mut self) {
        self.rows.clear();
        self.edit = None;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn rows(&self) -> &[UserRecord] {
        &self.rows
    }

    pub fn get(&self, id: u64) -> Option<&UserRecord> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn sort(&self) -> (SortKey, SortDirection) {
        self.sort
    }

    pub fn sort_by(&mut self, key: SortKey, direction: SortDirection) {
        self.sort = (key, direction);
        self.apply_sort();
    }

    /// Same key flips the direction; a new key starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        let (current, direction) = self.sort;
        let direction = if current == key {
            direction.flipped()
        } else {
            SortDirection::Asc
        };
        self.sort_by(key, direction);
    }

    pub fn remove(&mut self, id: u64) -> Option<UserRecord> {
        let pos = self.rows.iter().position(|row| row.id == id)?;
        if self.editing_id() == Some(id) {
            self.edit = None;
        }
        Some(self.rows.remove(pos))
    }

    /// Merges `patch` into the row; returns false if no row has `id`.
    pub fn replace(&mut self, id: u64, patch: UserPatch) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(email) = patch.email {
            row.email = email;
        }
        if let Some(website) = patch.website {
            row.website = website;
        }
        self.apply_sort();
        true
    }

    pub fn begin_edit(&mut self, id: u64) -> Option<&EditSession> {
        let row = self.get(id)?;
        let draft = UserPatch {
            name: Some(row.name.clone()),
            email: Some(row.email.clone()),
            website: Some(row.website.clone()),
        };
        self.edit = Some(EditSession { id, draft });
        self.edit.as_ref()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn editing_id(&self) -> Option<u64> {
        self.edit.as_ref().map(|session| session.id)
    }

    pub fn set_draft_field(&mut self, column: EditableColumn, value: impl Into<String>) -> bool {
        let Some(session) = self.edit.as_mut() else {
            return false;
        };
        let slot = match column {
            EditableColumn::Name => &mut session.draft.name,
            EditableColumn::Email => &mut session.draft.email,
            EditableColumn::Website => &mut session.draft.website,
        };
        *slot = Some(value.into());
        true
    }

    /// Applies the draft to its row and clears the edit target.
    pub fn save_edit(&mut self) -> bool {
        let Some(session) = self.edit.take() else {
            return false;
        };
        self.replace(session.id, session.draft)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    fn apply_sort(&mut self) {
        let (key, direction) = self.sort;
        self.rows.sort_by(|left, right| {
            let ordering = compare_by(key, left, right);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

fn compare_by(key: SortKey, left: &UserRecord, right: &UserRecord) -> Ordering {
    match key {
        SortKey::Id => left.id.cmp(&right.id),
        SortKey::Name => left.name.cmp(&right.name),
        SortKey::Email => left.email.cmp(&right.email),
        SortKey::Website => left.website.cmp(&right.website),
    }
}
