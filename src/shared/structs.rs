/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type Floor = i32;
pub type PassengerId = u32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingState {
    #[serde(rename = "shutDown")]
    ShutDown,
    #[serde(rename = "idle")]
    Idle,
    // Reserved for door dwell; no transition in the controller reaches it yet.
    #[serde(rename = "doorOpen")]
    DoorOpen,
    #[serde(rename = "movingDown")]
    MovingDown,
    #[serde(rename = "movingUp")]
    MovingUp,
}

impl OperatingState {
    /// Direction of travel needed to reach `goal` from `floor`.
    pub fn towards(floor: Floor, goal: Floor) -> OperatingState {
        if goal < floor {
            OperatingState::MovingDown
        } else if goal > floor {
            OperatingState::MovingUp
        } else {
            OperatingState::Idle
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, OperatingState::MovingDown | OperatingState::MovingUp)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarStatus {
    pub state: OperatingState,
    pub floor: Floor,
}

impl CarStatus {
    pub fn new(floor: Floor) -> CarStatus {
        CarStatus {
            state: OperatingState::ShutDown,
            floor,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub id: PassengerId,
}

impl Passenger {
    pub fn new(id: PassengerId) -> Passenger {
        Passenger { id }
    }
}

/// Snapshot of the request board, ordered by floor.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRequests {
    #[serde(rename = "internalRequests")]
    pub internal: BTreeSet<Floor>,
    #[serde(rename = "upHails")]
    pub up: BTreeSet<Floor>,
    #[serde(rename = "downHails")]
    pub down: BTreeSet<Floor>,
}

impl PendingRequests {
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.up.is_empty() && self.down.is_empty()
    }
}
