//! Instrument inventory records.

use std::fmt;

use crate::domain::Version;
use crate::domain::format::non_blank;

/// Backend identifier of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstrumentId(i64);

impl InstrumentId {
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

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An instrument as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub id: InstrumentId,
    pub version: Version,
    pub instrument_name: String,
    pub voice: String,
}

/// Editable instrument fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentDraft {
    pub instrument_name: String,
    pub voice: String,
}

/// Validation failures for instrument forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstrumentDraftError {
    /// The name was blank.
    #[error("El nombre del instrumento es obligatorio.")]
    MissingName,
    /// The voice was blank.
    #[error("La voz es obligatoria.")]
    MissingVoice,
}

impl InstrumentDraft {
    /// Trim both fields and require them to be non-blank.
    ///
    /// # Errors
    /// Returns [`InstrumentDraftError`] naming the first blank field.
    pub fn validated(&self) -> Result<Self, InstrumentDraftError> {
        let instrument_name =
            non_blank(&self.instrument_name).ok_or(InstrumentDraftError::MissingName)?;
        let voice = non_blank(&self.voice).ok_or(InstrumentDraftError::MissingVoice)?;
        Ok(Self {
            instrument_name,
            voice,
        })
    }
}

impl From<&Instrument> for InstrumentDraft {
    fn from(instrument: &Instrument) -> Self {
        Self {
            instrument_name: instrument.instrument_name.clone(),
            voice: instrument.voice.clone(),
        }
    }
}
