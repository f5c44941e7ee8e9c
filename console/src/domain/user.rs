//! Musician records managed through the users page.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::domain::Version;
use crate::domain::format::non_blank;

/// Backend identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A musician as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub version: Version,
    pub username: String,
    pub iam_id: String,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: Option<String>,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub band_join_date: Option<NaiveDate>,
    pub system_signup_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub profile_picture_url: Option<String>,
    pub active: bool,
    pub roles: BTreeSet<String>,
    pub instruments: BTreeSet<String>,
}

impl User {
    /// Surnames as shown in the list: `lastName secondLastName`.
    #[must_use]
    pub fn surnames(&self) -> String {
        match self.second_last_name.as_deref().map(str::trim) {
            Some(second) if !second.is_empty() => format!("{} {second}", self.last_name),
            _ => self.last_name.clone(),
        }
    }

    /// Comma-joined role names.
    #[must_use]
    pub fn roles_label(&self) -> String {
        self.roles.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }

    /// Comma-joined instrument names.
    #[must_use]
    pub fn instruments_label(&self) -> String {
        self.instruments
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Request body for `PUT /users/{id}`. Blank optional values are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub band_join_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Raw values of the user edit form.
///
/// Dates use the `YYYY-MM-DD` format produced by HTML date inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: String,
    pub birth_date: String,
    pub band_join_date: String,
    pub phone: String,
    pub notes: String,
    pub profile_picture_url: String,
}

/// Validation failures for the user edit form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDraftError {
    #[error("El email es obligatorio.")]
    MissingEmail,
    #[error("El nombre es obligatorio.")]
    MissingFirstName,
    #[error("El primer apellido es obligatorio.")]
    MissingLastName,
    #[error("La fecha «{value}» no es válida (formato AAAA-MM-DD).")]
    InvalidDate { value: String },
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, UserDraftError> {
    non_blank(raw)
        .map(|value| {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map_err(|_| UserDraftError::InvalidDate { value })
        })
        .transpose()
}

impl UserDraft {
    /// Validate the form and build the update payload.
    ///
    /// # Errors
    /// Returns [`UserDraftError`] when a required field is blank or a date
    /// does not parse.
    pub fn to_update(&self) -> Result<UserUpdate, UserDraftError> {
        Ok(UserUpdate {
            email: non_blank(&self.email).ok_or(UserDraftError::MissingEmail)?,
            first_name: non_blank(&self.first_name).ok_or(UserDraftError::MissingFirstName)?,
            last_name: non_blank(&self.last_name).ok_or(UserDraftError::MissingLastName)?,
            second_last_name: non_blank(&self.second_last_name),
            birth_date: parse_date(&self.birth_date)?,
            band_join_date: parse_date(&self.band_join_date)?,
            phone: non_blank(&self.phone),
            notes: non_blank(&self.notes),
            profile_picture_url: non_blank(&self.profile_picture_url),
        })
    }
}

fn date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            second_last_name: user.second_last_name.clone().unwrap_or_default(),
            birth_date: date_input(user.birth_date),
            band_join_date: date_input(user.band_join_date),
            phone: user.phone.clone().unwrap_or_default(),
            notes: user.notes.clone().unwrap_or_default(),
            profile_picture_url: user.profile_picture_url.clone().unwrap_or_default(),
        }
    }
}
