use std::sync::LazyLock;

use regex::Regex;

use crate::{Field, UserDraft};

pub const NAME_REQUIRED: &str = "Name is required";
pub const MOBILE_REQUIRED: &str = "Mobile number is required";
pub const MOBILE_INVALID: &str = "Please enter a valid 10-digit mobile number";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";

static MOBILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("mobile pattern compiles"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// One optional error slot per form field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    name: Option<String>,
    mobile: Option<String>,
    email: Option<String>,
}

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Clears the error for `field`, returning whether one was present.
    pub fn clear(&mut self, field: Field) -> bool {
        self.slot_mut(field).take().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        Field::ALL
            .iter()
            .filter(|field| self.slot(**field).is_some())
            .count()
    }

    /// Invalid fields with their messages, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|message| (field, message)))
    }

    fn set(&mut self, field: Field, message: &str) {
        *self.slot_mut(field) = Some(message.to_string());
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::Mobile => &self.mobile,
            Field::Email => &self.email,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Mobile => &mut self.mobile,
            Field::Email => &mut self.email,
        }
    }
}

/// Pure validation of a draft. An empty result means the draft may be submitted.
pub fn validate(draft: &UserDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.set(Field::Name, NAME_REQUIRED);
    }

    // Required checks trim, pattern checks see the raw value.
    if draft.mobile.trim().is_empty() {
        errors.set(Field::Mobile, MOBILE_REQUIRED);
    } else if !MOBILE_PATTERN.is_match(&draft.mobile) {
        errors.set(Field::Mobile, MOBILE_INVALID);
    }

    if draft.email.trim().is_empty() {
        errors.set(Field::Email, EMAIL_REQUIRED);
    } else if !EMAIL_PATTERN.is_match(&draft.email) {
        errors.set(Field::Email, EMAIL_INVALID);
    }

    errors
}
