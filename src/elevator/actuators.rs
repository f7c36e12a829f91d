use crossbeam_channel as cbc;
use serde::Serialize;

/***************************************/
/*          Actuator interface         */
/***************************************/

/// Vertical motor of the car.
pub trait ElevatorMotor: Send + Sync {
    fn go_up(&self);
    fn go_down(&self);
    fn go_brake(&self);
}

/// Door motor of the car.
pub trait DoorMotor: Send + Sync {
    fn go_open(&self);
    fn go_close(&self);
    fn go_hold(&self);
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MotorCommand {
    Up,
    Down,
    Brake,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorCommand {
    Open,
    Close,
    Hold,
}

/***************************************/
/*      Channel backed actuators       */
/***************************************/

/**
 * Actuators that forward every command over a crossbeam channel.
 *
 * The environment simulator listens on the receiving ends to produce sensor
 * events, and tests use them to observe what the state machine commanded.
 * Sends are fire-and-forget: a dropped receiver never stalls the car.
 */
pub struct ChannelMotor {
    motor_command_tx: cbc::Sender<MotorCommand>,
}

pub struct ChannelDoor {
    door_command_tx: cbc::Sender<DoorCommand>,
}

impl ChannelMotor {
    pub fn new(motor_command_tx: cbc::Sender<MotorCommand>) -> ChannelMotor {
        ChannelMotor { motor_command_tx }
    }

    fn send(&self, command: MotorCommand) {
        if self.motor_command_tx.send(command).is_err() {
            log::warn!("Motor command {:?} dropped, no receiver", command);
        }
    }
}

impl ChannelDoor {
    pub fn new(door_command_tx: cbc::Sender<DoorCommand>) -> ChannelDoor {
        ChannelDoor { door_command_tx }
    }

    fn send(&self, command: DoorCommand) {
        if self.door_command_tx.send(command).is_err() {
            log::warn!("Door command {:?} dropped, no receiver", command);
        }
    }
}

impl ElevatorMotor for ChannelMotor {
    fn go_up(&self) {
        self.send(MotorCommand::Up);
    }

    fn go_down(&self) {
        self.send(MotorCommand::Down);
    }

    fn go_brake(&self) {
        self.send(MotorCommand::Brake);
    }
}

impl DoorMotor for ChannelDoor {
    fn go_open(&self) {
        self.send(DoorCommand::Open);
    }

    fn go_close(&self) {
        self.send(DoorCommand::Close);
    }

    fn go_hold(&self) {
        self.send(DoorCommand::Hold);
    }
}
