//! Instruments list wiring.

use crate::domain::format::non_blank;
use crate::domain::ports::InstrumentSearch;
use crate::domain::{Instrument, InstrumentDraft, InstrumentId, Version};

use super::{ListMessages, ListPage, ListSpec, SortField};

/// Marker type binding the list page to instruments.
#[derive(Debug, Clone, Copy)]
pub struct InstrumentsList;

/// Instruments list page state.
pub type InstrumentsPage = ListPage<InstrumentsList>;

/// Pending instrument filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentFilters {
    pub instrument_name: String,
    pub voice: String,
}

/// Sortable instrument columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentSortField {
    InstrumentName,
    Voice,
}

impl SortField for InstrumentSortField {
    const ALL: &'static [Self] = &[Self::InstrumentName, Self::Voice];

    fn as_str(self) -> &'static str {
        match self {
            Self::InstrumentName => "instrumentName",
            Self::Voice => "voice",
        }
    }
}

impl ListSpec for InstrumentsList {
    type Entity = Instrument;
    type Id = InstrumentId;
    type Draft = InstrumentDraft;
    type Filters = InstrumentFilters;
    type Search = InstrumentSearch;
    type Sort = InstrumentSortField;

    const MESSAGES: ListMessages = ListMessages {
        load_failed: "Error cargando instrumentos",
        create_failed: "Error creando instrumento",
        update_failed: "Error actualizando instrumento",
        update_conflict: "El instrumento ha sido modificado por otro usuario. Recarga datos.",
        delete_failed: "Error borrando instrumento",
        delete_conflict: "El instrumento ha cambiado. Recarga la lista antes de borrar.",
        toggle_failed: "Error actualizando instrumento",
        toggle_conflict: "El instrumento ha sido modificado por otro usuario. Recarga datos.",
    };

    fn id_of(entity: &Instrument) -> InstrumentId {
        entity.id
    }

    fn version_of(entity: &Instrument) -> Version {
        entity.version
    }

    fn commit(filters: &InstrumentFilters) -> InstrumentSearch {
        InstrumentSearch {
            instrument_name: non_blank(&filters.instrument_name),
            voice: non_blank(&filters.voice),
        }
    }
}
