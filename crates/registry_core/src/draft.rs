/// The three fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Mobile,
    Email,
}

impl Field {
    /// Fields in display order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Mobile, Field::Email];

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Mobile => "mobile",
            Field::Email => "email",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Mobile => "Mobile Number",
            Field::Email => "Email Address",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Enter your full name",
            Field::Mobile => "Enter 10-digit mobile number",
            Field::Email => "Enter your email",
        }
    }
}

/// Not-yet-persisted field values for a pending submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDraft {
    pub name: String,
    pub mobile: String,
    pub email: String,
}

impl UserDraft {
    pub fn new(
        name: impl Into<String>,
        mobile: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mobile: mobile.into(),
            email: email.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Mobile => &self.mobile,
            Field::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Mobile => self.mobile = value,
            Field::Email => self.email = value,
        }
    }

    /// True when every field is empty (whitespace counts as content).
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
