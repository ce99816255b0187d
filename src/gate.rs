//! Product-policy hook consulted before bulk operations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operations that may be held back by product policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GatedAction {
    Import,
    Export,
    DeleteAll,
}

impl fmt::Display for GatedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GatedAction::Import => "import",
            GatedAction::Export => "export",
            GatedAction::DeleteAll => "delete all",
        };
        f.write_str(name)
    }
}

/// Decides whether a gated action may go ahead.
///
/// Consulted before any state is touched; a `false` leaves everything as is.
pub trait ActionGate: Send + Sync {
    fn can_proceed(&self, action: GatedAction) -> bool;
}

/// Gate that never blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ActionGate for AllowAll {
    fn can_proceed(&self, _action: GatedAction) -> bool {
        true
    }
}
