pub mod environment;

pub use environment::{Environment, SensorSource};

/// Stimuli delivered to the environment by the display or the hardware poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stimulus {
    FloorButton(u8),
    OpenButton,
    CloseButton,
    Block,
    /// Floor sensor reading, 1-indexed.
    FloorSensor(u8),
    Terminate,
}
