//! Wire shapes of the backend REST API (camelCase JSON).
//!
//! Responses decode into these DTOs first and are mapped into domain records
//! in one pass; requests are built from domain payloads.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Instrument, InstrumentDraft, InstrumentId, Role, User, UserId, UserUpdate, Version,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    pub(super) id: i64,
    pub(super) version: u64,
    pub(super) username: String,
    #[serde(default)]
    pub(super) iam_id: String,
    pub(super) first_name: String,
    pub(super) last_name: String,
    pub(super) second_last_name: Option<String>,
    pub(super) email: String,
    pub(super) birth_date: Option<NaiveDate>,
    pub(super) band_join_date: Option<NaiveDate>,
    pub(super) system_signup_date: Option<NaiveDate>,
    pub(super) phone: Option<String>,
    pub(super) notes: Option<String>,
    pub(super) profile_picture_url: Option<String>,
    #[serde(default)]
    pub(super) active: bool,
    #[serde(default)]
    pub(super) roles: BTreeSet<String>,
    #[serde(default)]
    pub(super) instruments: BTreeSet<String>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: UserId::new(dto.id),
            version: Version::new(dto.version),
            username: dto.username,
            iam_id: dto.iam_id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            second_last_name: dto.second_last_name,
            email: dto.email,
            birth_date: dto.birth_date,
            band_join_date: dto.band_join_date,
            system_signup_date: dto.system_signup_date,
            phone: dto.phone,
            notes: dto.notes,
            profile_picture_url: dto.profile_picture_url,
            active: dto.active,
            roles: dto.roles,
            instruments: dto.instruments,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserUpdateDto<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    second_last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    band_join_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_picture_url: Option<&'a str>,
}

impl<'a> From<&'a UserUpdate> for UserUpdateDto<'a> {
    fn from(update: &'a UserUpdate) -> Self {
        Self {
            email: &update.email,
            first_name: &update.first_name,
            last_name: &update.last_name,
            second_last_name: update.second_last_name.as_deref(),
            birth_date: update.birth_date,
            band_join_date: update.band_join_date,
            phone: update.phone.as_deref(),
            notes: update.notes.as_deref(),
            profile_picture_url: update.profile_picture_url.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InstrumentDto {
    pub(super) id: i64,
    pub(super) version: u64,
    pub(super) instrument_name: String,
    pub(super) voice: String,
}

impl From<InstrumentDto> for Instrument {
    fn from(dto: InstrumentDto) -> Self {
        Self {
            id: InstrumentId::new(dto.id),
            version: Version::new(dto.version),
            instrument_name: dto.instrument_name,
            voice: dto.voice,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InstrumentRequestDto<'a> {
    instrument_name: &'a str,
    voice: &'a str,
}

impl<'a> From<&'a InstrumentDraft> for InstrumentRequestDto<'a> {
    fn from(draft: &'a InstrumentDraft) -> Self {
        Self {
            instrument_name: &draft.instrument_name,
            voice: &draft.voice,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RoleDto {
    pub(super) id: String,
    pub(super) name: String,
    #[serde(default)]
    pub(super) description: Option<String>,
}

impl From<RoleDto> for Role {
    fn from(dto: RoleDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
        }
    }
}
