use crate::form::{FormState, SubmissionState, SUBMIT_SUCCESS_MESSAGE};
use crate::listing::{ListState, ListingState};
use crate::timestamp::format_timestamp;
use crate::view_model::{
    AppViewModel, Banner, FieldView, FormView, ListBody, ListView, UserRowView,
};
use crate::Field;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) form: FormState,
    pub(crate) listing: Option<ListingState>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The listing, if it is currently mounted.
    pub fn listing(&self) -> Option<&ListingState> {
        self.listing.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            form: form_view(&self.form),
            listing: self.listing.as_ref().map(list_view),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call, then resets.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

fn form_view(form: &FormState) -> FormView {
    let draft = form.draft();
    let fields = Field::ALL
        .into_iter()
        .map(|field| FieldView {
            field,
            label: field.label(),
            placeholder: field.placeholder(),
            value: draft.get(field).to_string(),
            error: form.errors().get(field).map(ToOwned::to_owned),
        })
        .collect();

    let banner = match form.submission() {
        SubmissionState::Succeeded => Some(Banner::Success(SUBMIT_SUCCESS_MESSAGE.to_string())),
        SubmissionState::Failed(message) => Some(Banner::Error(message.clone())),
        SubmissionState::Idle | SubmissionState::Submitting => None,
    };

    let submitting = form.is_submitting();
    FormView {
        fields,
        banner,
        submit_label: if submitting { "Submitting..." } else { "Submit" },
        submit_enabled: !submitting,
        preview: (!draft.is_empty()).then(|| draft.clone()),
    }
}

fn list_view(listing: &ListingState) -> ListView {
    let loading = listing.is_loading();
    let error = match listing.state() {
        ListState::Failed(message) => Some(message.clone()),
        ListState::Loading | ListState::Loaded(_) => None,
    };
    let users = listing.users();
    let body = if loading {
        ListBody::Loading
    } else if users.is_empty() {
        ListBody::Empty
    } else {
        let rows = users
            .iter()
            .map(|user| UserRowView {
                id: user.id,
                name: user.name.clone(),
                mobile: user.mobile.clone(),
                email: user.email.clone(),
                registered_at: format_timestamp(&user.created_at),
            })
            .collect();
        ListBody::Rows {
            rows,
            total_label: total_label(users.len()),
        }
    };

    ListView {
        refresh_label: if loading { "Loading..." } else { "Refresh" },
        refresh_enabled: !loading,
        error,
        body,
    }
}

fn total_label(count: usize) -> String {
    let noun = if count == 1 { "user" } else { "users" };
    format!("Total: {count} {noun}")
}
