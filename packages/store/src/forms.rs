//! # Add/Edit modal forms
//!
//! A [`FormState`] backs one modal: whether it is open, and the draft record
//! being edited. The draft is seeded either from the form's template (Add) or
//! from an existing record (Edit). Closing always restores the template, so
//! unsaved edits are discarded.
//!
//! Field updates are addressed by the form field name (`"firstName"`,
//! `"note"`, ...), mirroring the `name` attribute of the rendered inputs.

use crate::error::FieldError;
use crate::models::{Gender, NoteDraft, Patient};

/// A record that can be edited field by field.
pub trait Draft: Clone {
    /// Set exactly one field. Other fields stay untouched.
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError>;

    /// Identifier of the persisted record, if any.
    fn persisted_id(&self) -> Option<&str>;
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Draft for Patient {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "firstName" => self.first_name = value.to_string(),
            "lastName" => self.last_name = value.to_string(),
            "birthDate" => self.birth_date = value.to_string(),
            "address" => self.address = optional(value),
            "phone" => self.phone = optional(value),
            "gender" => {
                self.gender = Gender::parse(value).ok_or_else(|| FieldError::InvalidValue {
                    field: name.to_string(),
                    value: value.to_string(),
                })?;
            }
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn persisted_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

impl Draft for NoteDraft {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "note" => self.note = value.to_string(),
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn persisted_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// State of one Add or Edit modal.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState<D> {
    open: bool,
    draft: D,
    template: D,
}

impl<D: Draft> FormState<D> {
    /// A closed form whose draft resets to `template`.
    pub fn new(template: D) -> Self {
        Self {
            open: false,
            draft: template.clone(),
            template,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Open with the current draft (the template after a reset).
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Open seeded from an existing record.
    pub fn open_with(&mut self, record: D) {
        self.draft = record;
        self.open = true;
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        self.draft.set_field(name, value)
    }

    /// Close and discard the draft.
    pub fn close(&mut self) {
        self.open = false;
        self.draft = self.template.clone();
    }
}

/// What a submit ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The API accepted the draft.
    Saved,
    /// Nothing was sent, the draft had no persisted identifier.
    Skipped,
}
