use std::fmt;

use thiserror::Error;

use crate::consts::consts::{NAME_MAX_LENGTH, NAME_MIN_LENGTH};

use super::person::{Person, PersonPayload};

/// A single broken rule, rendered as `<Field> - <message>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", capitalize(self.field), self.message)
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{}]", join_violations(.0))]
pub struct ValidationError(pub Vec<Violation>);

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// Present and containing at least one non-whitespace character
    NotBlank,
    /// Character count within `[min, max]`, null values are left to `NotBlank`
    Size { min: usize, max: usize },
}

impl Constraint {
    /// Returns the violation message when `value` breaks the constraint
    fn check(&self, value: Option<&str>) -> Option<String> {
        match self {
            Constraint::NotBlank => match value {
                Some(v) if !v.trim().is_empty() => None,
                _ => Some("must not be blank".to_string()),
            },
            Constraint::Size { min, max } => {
                let length = value?.chars().count();

                if length < *min || length > *max {
                    return Some(format!("size must be between {} and {}", min, max));
                }

                None
            }
        }
    }
}

/// Checks a candidate person against field rules, collecting every violation instead of stopping at the first
pub trait Validator: Send + Sync {
    fn violations(&self, candidate: &PersonPayload) -> Vec<Violation>;

    /// Typed form of [`Validator::violations`], a valid candidate becomes an unsaved [`Person`].
    /// Any client supplied id is dropped, identity is assigned by the store.
    fn validate(&self, candidate: PersonPayload) -> Result<Person, ValidationError> {
        let violations = self.violations(&candidate);

        if !violations.is_empty() {
            return Err(ValidationError(violations));
        }

        match candidate.name {
            Some(name) => Ok(Person::new(name)),
            // NotBlank rejects a missing name, only reachable with a custom rule set
            None => Err(ValidationError(vec![Violation {
                field: "name",
                message: "must not be null".to_string(),
            }])),
        }
    }
}

pub struct PersonValidator {
    name_constraints: Vec<Constraint>,
}

impl PersonValidator {
    pub fn new(name_constraints: Vec<Constraint>) -> Self {
        Self { name_constraints }
    }
}

impl Default for PersonValidator {
    fn default() -> Self {
        Self::new(vec![
            Constraint::NotBlank,
            Constraint::Size {
                min: NAME_MIN_LENGTH,
                max: NAME_MAX_LENGTH,
            },
        ])
    }
}

impl Validator for PersonValidator {
    fn violations(&self, candidate: &PersonPayload) -> Vec<Violation> {
        let name = candidate.name.as_deref();

        // `id` is system assigned, nothing to check
        self.name_constraints
            .iter()
            .filter_map(|constraint| constraint.check(name))
            .map(|message| Violation {
                field: "name",
                message,
            })
            .collect()
    }
}
