pub mod actuators;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod hardware;
pub mod requests;
pub mod state;

mod state_tests;
mod test_support;

pub use actuators::{ChannelDoor, ChannelMotor, DoorCommand, DoorMotor, ElevatorMotor, MotorCommand};
pub use context::ElevatorContext;
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use error::ElevatorError;
pub use hardware::{ElevioDoor, ElevioMotor, ElevioSensors};
pub use requests::FloorRequestQueue;
