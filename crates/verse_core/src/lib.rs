//! Daily Peace core: response normalization, reference parsing and the pure
//! fetch state machine.
mod effect;
mod msg;
mod normalize;
mod reference;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use normalize::{normalize, RawResponse};
pub use reference::{parse, ParsedVerse};
pub use state::{FetchState, RequestId, VerseState};
pub use update::update;
pub use view_model::{VerseView, ERROR_HEADLINE, RETRY_LABEL, VERSE_TITLE};
