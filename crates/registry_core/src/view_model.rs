use crate::{Field, UserDraft, UserId};

pub const EMPTY_LIST_TITLE: &str = "No users registered yet.";
pub const EMPTY_LIST_SUBTITLE: &str = "Submit the form above to add your first user!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form: FormView,
    /// `None` while the listing is not mounted.
    pub listing: Option<ListView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub banner: Option<Banner>,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    /// Echo of the draft while any field has content.
    pub preview: Option<UserDraft>,
}

impl FormView {
    pub fn field(&self, field: Field) -> Option<&FieldView> {
        self.fields.iter().find(|view| view.field == field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub refresh_label: &'static str,
    pub refresh_enabled: bool,
    pub error: Option<String>,
    pub body: ListBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Loading,
    Empty,
    /// Rows in server order, with a pluralized total.
    Rows {
        rows: Vec<UserRowView>,
        total_label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRowView {
    pub id: UserId,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub registered_at: String,
}
