#![cfg(test)]
/*
 * Shared fixtures for the elevator unit tests.
 */
use crate::elevator::{
    ChannelDoor, ChannelMotor, Diagnostics, DoorCommand, ElevatorContext, MotorCommand,
};
use crossbeam_channel::{unbounded, Receiver};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Keeps every diagnostic so tests can assert on them.
#[derive(Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<(Severity, String, String)>>,
}

impl RecordingDiagnostics {
    pub fn entries(&self) -> Vec<(Severity, String, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries()
            .iter()
            .filter(|(s, _, _)| *s == severity)
            .count()
    }

    pub fn last(&self) -> Option<(Severity, String, String)> {
        self.entries().last().cloned()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, title: &str, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((Severity::Info, title.to_string(), message.to_string()));
    }

    fn error(&self, title: &str, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((Severity::Error, title.to_string(), message.to_string()));
    }
}

pub struct Fixture {
    pub ctx: ElevatorContext,
    pub motor_rx: Receiver<MotorCommand>,
    pub door_rx: Receiver<DoorCommand>,
    pub diagnostics: Arc<RecordingDiagnostics>,
}

impl Fixture {
    pub fn new(max_floor: u8, initial_floor: u8) -> Fixture {
        let (motor_tx, motor_rx) = unbounded::<MotorCommand>();
        let (door_tx, door_rx) = unbounded::<DoorCommand>();
        let diagnostics = Arc::new(RecordingDiagnostics::default());

        let ctx = ElevatorContext::new(
            max_floor,
            initial_floor,
            Arc::new(ChannelMotor::new(motor_tx)),
            Arc::new(ChannelDoor::new(door_tx)),
            diagnostics.clone(),
        )
        .unwrap();

        Fixture {
            ctx,
            motor_rx,
            door_rx,
            diagnostics,
        }
    }

    /// A car already travelling from `from` to `to`, with the departure
    /// commands and diagnostics consumed.
    pub fn travelling(max_floor: u8, from: u8, to: u8) -> Fixture {
        let mut fixture = Fixture::new(max_floor, from);
        fixture.ctx.on_floor_button_pressed(to).unwrap();
        fixture.drain();
        fixture
    }

    pub fn motor_commands(&self) -> Vec<MotorCommand> {
        self.motor_rx.try_iter().collect()
    }

    pub fn door_commands(&self) -> Vec<DoorCommand> {
        self.door_rx.try_iter().collect()
    }

    pub fn drain(&self) {
        self.motor_rx.try_iter().for_each(drop);
        self.door_rx.try_iter().for_each(drop);
        self.diagnostics.clear();
    }
}
