use thiserror::Error;

/// Contract violations by the caller or a sensor. The state is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ElevatorError {
    #[error("floor {floor} is outside [1, {max_floor}]")]
    FloorOutOfRange { floor: u8, max_floor: u8 },

    #[error("arrival reported for floor {reported}, but the committed destination is {committed:?}")]
    UncommittedDestination { reported: u8, committed: Option<u8> },
}
