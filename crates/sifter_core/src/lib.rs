//! Sifter core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    ExportDestination, ExportOutcome, ParseFormat, ParseResult, ParsedPayload, Session,
    SessionPhase, ACCEPTED_EXTENSIONS,
};
pub use update::update;
pub use view_model::{preview_of, SessionViewModel, CSV_PREVIEW_LINES, JSON_PREVIEW_ITEMS};
