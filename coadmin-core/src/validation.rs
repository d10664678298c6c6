//! Field-level validation of a company draft.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::model::Company;

/// Editable fields of the company form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Integrations,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Name, Field::Integrations];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Company Name",
            Field::Integrations => "Integrations",
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Company name is required")]
    NameRequired,

    /// `index` is zero-based; the message is one-based
    #[error("Integration {} is missing a name or logo", .index + 1)]
    IntegrationIncomplete { index: usize },
}

/// Per-field validation results, at most one error per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, ValidationError>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.fields.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.fields.get(&field).copied()
    }

    pub fn contains(&self, error: ValidationError) -> bool {
        self.fields.values().any(|e| *e == error)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.fields.iter().map(|(f, e)| (*f, *e))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field.label(), error)?;
            first = false;
        }
        Ok(())
    }
}

/// Validate a single field of `company`
pub fn validate_field(company: &Company, field: Field) -> Option<ValidationError> {
    match field {
        Field::Name => company
            .name
            .trim()
            .is_empty()
            .then_some(ValidationError::NameRequired),
        Field::Integrations => company
            .integrations
            .iter()
            .position(|i| !i.is_complete())
            .map(|index| ValidationError::IntegrationIncomplete { index }),
    }
}

/// Validate every field; empty result means the company can be saved
pub fn validate(company: &Company) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in Field::ALL {
        if let Some(error) = validate_field(company, field) {
            errors.insert(field, error);
        }
    }
    errors
}
