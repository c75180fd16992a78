//! Event types that originate in the runtime rather than the engine.

use std::fmt;

use combat_core::OperatorRequest;
use serde::{Deserialize, Serialize};

/// Identifies a connected operator session.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperatorId(pub u32);

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operator-{}", self.0)
    }
}

/// Traffic on the participant-to-operator relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayEvent {
    /// A participant request was forwarded to `operator`, who decides
    /// whether to apply it.
    RequestRelayed {
        operator: OperatorId,
        request: OperatorRequest,
    },

    OperatorJoined { operator: OperatorId },

    OperatorLeft { operator: OperatorId },
}
