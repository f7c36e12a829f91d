/***************************************/
/*        3rd party libraries          */
/***************************************/
use driver_rust::elevio::elev::{DIRN_DOWN, DIRN_STOP, DIRN_UP};
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Operating mode of the car. The event handlers live in `elevator::state`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorState {
    #[serde(rename = "idleClosed")]
    IdleClosed,
    #[serde(rename = "doorOpening")]
    DoorOpening,
    #[serde(rename = "idleOpen")]
    IdleOpen,
    #[serde(rename = "doorClosing")]
    DoorClosing,
    #[serde(rename = "doorBlocked")]
    DoorBlocked,
    #[serde(rename = "goingUpClosed")]
    GoingUpClosed,
    #[serde(rename = "goingDownClosed")]
    GoingDownClosed,
}

impl ElevatorState {
    pub fn is_moving(&self) -> bool {
        matches!(self, ElevatorState::GoingUpClosed | ElevatorState::GoingDownClosed)
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElevatorState::IdleClosed => "idle (door closed)",
            ElevatorState::DoorOpening => "door opening",
            ElevatorState::IdleOpen => "idle (door open)",
            ElevatorState::DoorClosing => "door closing",
            ElevatorState::DoorBlocked => "door blocked",
            ElevatorState::GoingUpClosed => "going up",
            ElevatorState::GoingDownClosed => "going down",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stop,
}

impl Direction {
    pub fn to_u8(&self) -> u8 {
        match *self {
            Direction::Up => DIRN_UP,
            Direction::Down => DIRN_DOWN,
            Direction::Stop => DIRN_STOP,
        }
    }

    /// Direction of travel from `from` to `to`.
    pub fn between(from: u8, to: u8) -> Direction {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Stop
        }
    }
}

/// Snapshot pushed to the display after every state or floor change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Status {
    pub state: ElevatorState,
    pub floor: u8,
    pub destination: Option<u8>,
    #[serde(rename = "pendingRequests")]
    pub pending_requests: Vec<u8>,
}
