//! Core of the Flash Word vocabulary app: the word list, JSON import and
//! export, and timed reminder notifications.

pub mod gate;
pub mod reminders;
pub mod session;
pub mod storage;
pub mod transfer;
pub mod words;

pub use gate::{ActionGate, AllowAll, GatedAction};
pub use session::{Session, SessionError};
