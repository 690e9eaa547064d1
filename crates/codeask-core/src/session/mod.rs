//! Session domain module.
//!
//! - `message`: conversation message types (`Message`)
//! - `reference`: code references attached to answers (`Reference`)
//! - `store`: the in-memory session ledger (`SessionStore`)
//! - `event`: turn resolution events (`SessionEvent`, `TurnObserver`)

mod event;
mod message;
mod reference;
mod store;

pub use event::{SessionEvent, TurnObserver, TurnOutcome};
pub use message::Message;
pub use reference::Reference;
pub use store::SessionStore;
