use crate::elevator::actuators::{ChannelDoor, ChannelMotor, DoorMotor, ElevatorMotor};
use crate::shared::Direction;
use crate::simulator::Stimulus;
use crossbeam_channel as cbc;
use driver_rust::elevio::elev::{Elevator, CAB};
use std::time::Duration;

/***************************************/
/*         Hardware actuators          */
/***************************************/

/**
 * Vertical motor driven through the elevio driver.
 *
 * Every command is mirrored to a channel motor as well, so the environment
 * keeps its view of the actuators when running against hardware.
 */
pub struct ElevioMotor {
    elevator: Elevator,
    mirror: ChannelMotor,
}

/// Door motor on the elevio driver. The hardware only has a door lamp, which
/// is lit while the door is open or held.
pub struct ElevioDoor {
    elevator: Elevator,
    mirror: ChannelDoor,
}

impl ElevioMotor {
    pub fn new(elevator: Elevator, mirror: ChannelMotor) -> ElevioMotor {
        ElevioMotor { elevator, mirror }
    }
}

impl ElevioDoor {
    pub fn new(elevator: Elevator, mirror: ChannelDoor) -> ElevioDoor {
        ElevioDoor { elevator, mirror }
    }
}

impl ElevatorMotor for ElevioMotor {
    fn go_up(&self) {
        self.elevator.motor_direction(Direction::Up.to_u8());
        self.mirror.go_up();
    }

    fn go_down(&self) {
        self.elevator.motor_direction(Direction::Down.to_u8());
        self.mirror.go_down();
    }

    fn go_brake(&self) {
        self.elevator.motor_direction(Direction::Stop.to_u8());
        self.mirror.go_brake();
    }
}

impl DoorMotor for ElevioDoor {
    fn go_open(&self) {
        self.elevator.door_light(true);
        self.mirror.go_open();
    }

    fn go_close(&self) {
        self.elevator.door_light(false);
        self.mirror.go_close();
    }

    fn go_hold(&self) {
        self.elevator.door_light(true);
        self.mirror.go_hold();
    }
}

/***************************************/
/*           Hardware sensors          */
/***************************************/

/**
 * # Elevio Sensors
 * Polls the elevio driver and forwards sensor edges to the environment.
 *
 * Hardware floors are 0-indexed and are shifted to the 1-indexed floors the
 * state machine works with.
 *
 * # Fields
 * - `elevator`:         Driver handle shared with the actuators.
 * - `poll_period`:      Milliseconds between two polls.
 * - `current_floor`:    Last floor sensor reading.
 * - `obstruction`:      Last obstruction switch position.
 * - `cab_buttons`:      Last cab button readings, one per floor.
 * - `stimulus_tx`:      Sender into the environment.
 * - `terminate_rx`:     Stops the polling loop.
 */
pub struct ElevioSensors {
    elevator: Elevator,
    poll_period: u64,
    current_floor: Option<u8>,
    obstruction: bool,
    cab_buttons: Vec<bool>,
    stimulus_tx: cbc::Sender<Stimulus>,
    terminate_rx: cbc::Receiver<()>,
}

impl ElevioSensors {
    pub fn new(
        elevator: Elevator,
        poll_period: u64,
        stimulus_tx: cbc::Sender<Stimulus>,
        terminate_rx: cbc::Receiver<()>,
    ) -> ElevioSensors {
        let num_floors = elevator.num_floors as usize;
        ElevioSensors {
            elevator,
            poll_period,
            current_floor: None,
            obstruction: false,
            cab_buttons: vec![false; num_floors],
            stimulus_tx,
            terminate_rx,
        }
    }

    pub fn run(mut self) {
        loop {
            for stimulus in self.poll() {
                if self.stimulus_tx.send(stimulus).is_err() {
                    log::info!("Environment has stopped, hardware poller exiting");
                    return;
                }
            }

            let terminate = cbc::select! {
                recv(self.terminate_rx) -> _ => true,
                default(Duration::from_millis(self.poll_period)) => false,
            };
            if terminate {
                return;
            }
        }
    }

    fn poll(&mut self) -> Vec<Stimulus> {
        let mut stimuli = Vec::new();

        // New floor hit, the reading is None between floors
        let floor = self.elevator.floor_sensor();
        if floor != self.current_floor {
            if let Some(f) = floor {
                stimuli.push(Stimulus::FloorSensor(f + 1));
            }
            self.current_floor = floor;
        }

        // Obstruction switched on
        let obstruction = self.elevator.obstruction();
        if obstruction && !self.obstruction {
            stimuli.push(Stimulus::Block);
        }
        self.obstruction = obstruction;

        // Cab buttons, forwarded on the press edge only
        for floor in 0..self.elevator.num_floors {
            let pressed = self.elevator.call_button(floor, CAB);
            if pressed && !self.cab_buttons[floor as usize] {
                stimuli.push(Stimulus::FloorButton(floor + 1));
            }
            self.cab_buttons[floor as usize] = pressed;
        }

        stimuli
    }
}
