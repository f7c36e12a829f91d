use crate::elevator::actuators::{DoorMotor, ElevatorMotor};
use crate::elevator::diagnostics::Diagnostics;
use crate::elevator::error::ElevatorError;
use crate::elevator::requests::FloorRequestQueue;
use crate::shared::{Direction, ElevatorState, Status};
use crossbeam_channel as cbc;
use std::sync::Arc;

/**
 * Host of the elevator state machine for a single car.
 *
 * The context owns the active state, the tracked floor, the committed
 * destination and the request queue. It makes no decisions itself: every
 * event entry point forwards to the handler of the active `ElevatorState`,
 * which issues actuator commands and hands over to the next state.
 *
 * # Fields
 * - `state`:           Active operating mode, `IdleClosed` after construction.
 * - `current_floor`:   Tracked floor, 1-indexed, always in `[1, max_floor]`.
 * - `destination`:     Floor committed to while moving.
 * - `arrival_door_open`: Set on arrival, when the state is already `IdleClosed`
 *                      but the door is still opening; cleared by the door sensor.
 * - `requests`:        Pending floor requests.
 * - `elevator_motor`:  Vertical motor capability.
 * - `door_motor`:      Door motor capability.
 * - `diagnostics`:     Sink for ignored or contradictory stimuli.
 * - `status_tx`:       Optional display channel, receives a `Status` after every change.
 */
pub struct ElevatorContext {
    state: ElevatorState,
    current_floor: u8,
    max_floor: u8,
    destination: Option<u8>,
    arrival_door_open: bool,
    requests: FloorRequestQueue,

    elevator_motor: Arc<dyn ElevatorMotor>,
    door_motor: Arc<dyn DoorMotor>,
    diagnostics: Arc<dyn Diagnostics>,
    status_tx: Option<cbc::Sender<Status>>,
}

impl ElevatorContext {
    pub fn new(
        max_floor: u8,
        initial_floor: u8,
        elevator_motor: Arc<dyn ElevatorMotor>,
        door_motor: Arc<dyn DoorMotor>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<ElevatorContext, ElevatorError> {
        if initial_floor == 0 || initial_floor > max_floor {
            return Err(ElevatorError::FloorOutOfRange {
                floor: initial_floor,
                max_floor,
            });
        }

        Ok(ElevatorContext {
            state: ElevatorState::IdleClosed,
            current_floor: initial_floor,
            max_floor,
            destination: None,
            arrival_door_open: false,
            requests: FloorRequestQueue::new(),
            elevator_motor,
            door_motor,
            diagnostics,
            status_tx: None,
        })
    }

    /// Attaches a display channel and pushes the initial status on it.
    pub fn with_status_channel(mut self, status_tx: cbc::Sender<Status>) -> ElevatorContext {
        self.status_tx = Some(status_tx);
        self.notify();
        self
    }

    /***************************************/
    /*           Event dispatch            */
    /***************************************/
    pub fn on_door_closed(&mut self) {
        let state = self.state;
        state.on_door_closed(self);
    }

    pub fn on_door_open(&mut self) {
        let state = self.state;
        state.on_door_open(self);
    }

    pub fn on_door_blocked(&mut self) {
        let state = self.state;
        state.on_door_blocked(self);
    }

    pub fn on_floor_button_pressed(&mut self, floor: u8) -> Result<(), ElevatorError> {
        let state = self.state;
        state.on_floor_button_pressed(self, floor)
    }

    pub fn on_open_button_pressed(&mut self) {
        let state = self.state;
        state.on_open_button_pressed(self);
    }

    pub fn on_close_button_pressed(&mut self) {
        let state = self.state;
        state.on_close_button_pressed(self);
    }

    pub fn on_floor_reached(&mut self, current: u8, destination: u8) -> Result<(), ElevatorError> {
        let state = self.state;
        state.on_floor_reached(self, current, destination)
    }

    /***************************************/
    /*        Accessors for states         */
    /***************************************/
    pub fn state(&self) -> ElevatorState {
        self.state
    }

    pub fn set_state(&mut self, state: ElevatorState) {
        if self.state != state {
            log::debug!("State {} -> {}", self.state, state);
        }
        if state != ElevatorState::IdleClosed {
            self.arrival_door_open = false;
        }
        self.state = state;
        self.notify();
    }

    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    /// Fails instead of clamping, since a clamped value would hide a sensor fault.
    pub fn set_current_floor(&mut self, floor: u8) -> Result<(), ElevatorError> {
        self.check_floor(floor)?;
        self.current_floor = floor;
        self.notify();
        Ok(())
    }

    pub fn max_floor(&self) -> u8 {
        self.max_floor
    }

    pub fn check_floor(&self, floor: u8) -> Result<(), ElevatorError> {
        if floor == 0 || floor > self.max_floor {
            return Err(ElevatorError::FloorOutOfRange {
                floor,
                max_floor: self.max_floor,
            });
        }
        Ok(())
    }

    pub fn destination(&self) -> Option<u8> {
        self.destination
    }

    pub fn clear_destination(&mut self) {
        self.destination = None;
    }

    pub fn arrival_door_open(&self) -> bool {
        self.arrival_door_open
    }

    pub fn set_arrival_door_open(&mut self, pending: bool) {
        self.arrival_door_open = pending;
    }

    /// Republishes the status, for changes that do not switch state.
    pub fn publish(&self) {
        self.notify();
    }

    pub fn requests(&self) -> &FloorRequestQueue {
        &self.requests
    }

    pub fn requests_mut(&mut self) -> &mut FloorRequestQueue {
        &mut self.requests
    }

    pub fn elevator_motor(&self) -> &dyn ElevatorMotor {
        self.elevator_motor.as_ref()
    }

    pub fn door_motor(&self) -> &dyn DoorMotor {
        self.door_motor.as_ref()
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Commits to the next queued floor and starts the motor toward it.
    ///
    /// Returns `false` when nothing is queued. A queued floor equal to the
    /// current one opens the door instead of moving.
    pub fn depart_to_next_request(&mut self) -> bool {
        let next = match self.requests.next_destination(self.current_floor) {
            Some(floor) => floor,
            None => return false,
        };

        match Direction::between(self.current_floor, next) {
            Direction::Up => {
                self.destination = Some(next);
                self.elevator_motor.go_up();
                self.set_state(ElevatorState::GoingUpClosed);
            }
            Direction::Down => {
                self.destination = Some(next);
                self.elevator_motor.go_down();
                self.set_state(ElevatorState::GoingDownClosed);
            }
            Direction::Stop => {
                self.door_motor.go_open();
                self.set_state(ElevatorState::DoorOpening);
                return true;
            }
        }
        self.diagnostics.info(
            "Departure",
            &format!(
                "Leaving {}F for {}F, heading {:?}.",
                self.current_floor,
                next,
                self.requests.direction()
            ),
        );
        true
    }

    pub fn status(&self) -> Status {
        Status {
            state: self.state,
            floor: self.current_floor,
            destination: self.destination,
            pending_requests: self.requests.pending(),
        }
    }

    fn notify(&self) {
        if let Some(status_tx) = &self.status_tx {
            // The display may have gone away; the car keeps running regardless.
            let _ = status_tx.send(self.status());
        }
    }
}
