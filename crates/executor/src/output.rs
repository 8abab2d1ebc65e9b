//! Output enum for action execution results
//!
//! Every action produces exactly one output variant; the mapping is
//! deterministic and documented on the [`Action`](crate::Action)
//! variants.

use serde::{Deserialize, Serialize};
use supple_core::types::{Record, Status};

/// Successful action execution results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Mutation envelope (`putDoc`, `mergeDoc`, `deleteDoc`)
    Status(Status),
    /// Optional record (`getDoc`; absence is not an error)
    Maybe(Option<Record>),
    /// Record page (`scanDocs`, `findDocs`)
    Records(Vec<Record>),
    /// Namespace record count (`countDocs`)
    Count(u64),
    /// Presence check result (`existsDoc`)
    Bool(bool),
}
