//! Token endpoint response shapes.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::ports::TokenGrant;

#[derive(Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
    #[serde(default)]
    pub(super) expires_in: u64,
    #[serde(default)]
    pub(super) refresh_token: Option<String>,
    #[serde(default)]
    pub(super) id_token: Option<String>,
}

impl From<TokenResponseDto> for TokenGrant {
    fn from(dto: TokenResponseDto) -> Self {
        Self {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            id_token: dto.id_token,
            expires_in: Duration::from_secs(dto.expires_in),
        }
    }
}

/// OAuth 2.0 error body (`error`, `error_description`).
#[derive(Debug, Default, Deserialize)]
pub(super) struct OAuthErrorDto {
    #[serde(default)]
    pub(super) error: String,
    #[serde(default)]
    pub(super) error_description: Option<String>,
}

impl OAuthErrorDto {
    pub(super) fn summary(&self) -> String {
        match self.error_description.as_deref() {
            Some(description) if !description.is_empty() => {
                format!("{}: {description}", self.error)
            }
            _ => self.error.clone(),
        }
    }
}
