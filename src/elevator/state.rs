use crate::elevator::context::ElevatorContext;
use crate::elevator::error::ElevatorError;
use crate::shared::ElevatorState;
use crate::shared::ElevatorState::{
    DoorBlocked, DoorClosing, DoorOpening, GoingDownClosed, GoingUpClosed, IdleClosed, IdleOpen,
};

const INVALID_OPERATION: &str = "Invalid Operation";
const INVALID_SENSOR_SIGNAL: &str = "Invalid Sensor Signal";

/**
 * Event handlers of the elevator state machine.
 *
 * Each handler matches exhaustively on the active variant. Stimuli that do
 * not apply are reported through the context's diagnostics and change
 * nothing: well-formed but inapplicable ones as info, ones contradicting the
 * door/motion invariant as error.
 *
 * `IdleClosed` is entered on arrival while the door motor is still opening
 * (`ElevatorContext::arrival_door_open`). Until the door reports open the car
 * treats itself as mid door cycle and does not depart.
 */
impl ElevatorState {
    pub fn on_door_closed(self, ctx: &mut ElevatorContext) {
        match self {
            GoingUpClosed | GoingDownClosed => ctx.diagnostics().info(
                "Door Closed",
                "Received a signal indicating that the door is closed.",
            ),
            IdleClosed if ctx.arrival_door_open() => ctx.diagnostics().error(
                INVALID_SENSOR_SIGNAL,
                "Door reported closed while opening after arrival.",
            ),
            IdleClosed => ctx
                .diagnostics()
                .info("Door Closed", "Door is already closed."),
            DoorClosing => {
                ctx.diagnostics().info("Door Closed", "Door is now closed.");
                ctx.set_state(IdleClosed);
                ctx.depart_to_next_request();
            }
            DoorOpening | IdleOpen | DoorBlocked => ctx.diagnostics().error(
                INVALID_SENSOR_SIGNAL,
                &format!("Door reported closed while {}.", self),
            ),
        }
    }

    pub fn on_door_open(self, ctx: &mut ElevatorContext) {
        match self {
            GoingUpClosed | GoingDownClosed => ctx.diagnostics().error(
                INVALID_SENSOR_SIGNAL,
                "Received an invalid signal when running. Door is open unexpectedly.",
            ),
            IdleClosed if !ctx.arrival_door_open() => ctx.diagnostics().error(
                INVALID_SENSOR_SIGNAL,
                "Door is open but was never commanded to open.",
            ),
            IdleClosed | DoorOpening | DoorBlocked => {
                ctx.diagnostics().info("Door Open", "Door is now open.");
                ctx.set_state(IdleOpen);
            }
            IdleOpen => ctx.diagnostics().info("Door Open", "Door is already open."),
            DoorClosing => ctx.diagnostics().error(
                INVALID_SENSOR_SIGNAL,
                "Door reported open while closing.",
            ),
        }
    }

    pub fn on_door_blocked(self, ctx: &mut ElevatorContext) {
        match self {
            GoingUpClosed | GoingDownClosed => ctx.diagnostics().info(
                INVALID_OPERATION,
                &format!("Elevator is {}. Block door operation is invalid.", self),
            ),
            IdleClosed if !ctx.arrival_door_open() => ctx.diagnostics().info(
                INVALID_OPERATION,
                "Door is closed. Block door operation is invalid.",
            ),
            IdleClosed | DoorOpening => ctx
                .diagnostics()
                .info("Door Blocked", "Door is opening, obstruction ignored."),
            IdleOpen | DoorClosing => {
                ctx.diagnostics()
                    .info("Door Blocked", "Obstruction detected, holding the door.");
                ctx.door_motor().go_hold();
                ctx.set_state(DoorBlocked);
            }
            DoorBlocked => ctx.diagnostics().info("Door Blocked", "Door is still blocked."),
        }
    }

    pub fn on_floor_button_pressed(
        self,
        ctx: &mut ElevatorContext,
        floor: u8,
    ) -> Result<(), ElevatorError> {
        ctx.check_floor(floor)?;

        match self {
            GoingUpClosed | GoingDownClosed => ctx.diagnostics().info(
                INVALID_OPERATION,
                &format!(
                    "Elevator is {}. You can not go to another floor before it reaches current destination.",
                    self
                ),
            ),
            IdleClosed if !ctx.arrival_door_open() => {
                if floor == ctx.current_floor() {
                    ctx.diagnostics().info(
                        "Floor Button",
                        &format!("Already at {}F, opening the door.", floor),
                    );
                    ctx.door_motor().go_open();
                    ctx.set_state(DoorOpening);
                } else {
                    ctx.requests_mut().enqueue(floor);
                    ctx.depart_to_next_request();
                }
            }
            IdleClosed | DoorOpening | IdleOpen | DoorClosing | DoorBlocked => {
                if floor == ctx.current_floor() {
                    ctx.diagnostics()
                        .info("Floor Button", &format!("Already at {}F.", floor));
                } else if ctx.requests().contains(floor) {
                    ctx.diagnostics()
                        .info("Floor Button", &format!("{}F is already queued.", floor));
                } else {
                    ctx.requests_mut().enqueue(floor);
                    ctx.diagnostics().info(
                        "Floor Button",
                        &format!(
                            "{}F queued until the door is closed, {} pending.",
                            floor,
                            ctx.requests().len()
                        ),
                    );
                    ctx.publish();
                }
            }
        }
        Ok(())
    }

    pub fn on_open_button_pressed(self, ctx: &mut ElevatorContext) {
        match self {
            GoingUpClosed | GoingDownClosed => ctx.diagnostics().info(
                INVALID_OPERATION,
                &format!("Elevator is {}. Open door operation is invalid.", self),
            ),
            IdleClosed if ctx.arrival_door_open() => {
                ctx.diagnostics().info("Open Button", "Door is already opening.")
            }
            IdleClosed | DoorClosing | DoorBlocked => {
                ctx.door_motor().go_open();
                ctx.set_state(DoorOpening);
            }
            DoorOpening => ctx.diagnostics().info("Open Button", "Door is already opening."),
            IdleOpen => ctx.diagnostics().info("Open Button", "Door is already open."),
        }
    }

    pub fn on_close_button_pressed(self, ctx: &mut ElevatorContext) {
        match self {
            GoingUpClosed | GoingDownClosed => ctx.diagnostics().info(
                INVALID_OPERATION,
                &format!("Elevator is {}. Close door operation is invalid.", self),
            ),
            IdleClosed if !ctx.arrival_door_open() => {
                ctx.diagnostics().info("Close Button", "Door is already closed.")
            }
            IdleClosed | DoorOpening | IdleOpen | DoorBlocked => {
                ctx.door_motor().go_close();
                ctx.set_state(DoorClosing);
            }
            DoorClosing => ctx.diagnostics().info("Close Button", "Door is already closing."),
        }
    }

    /// Motion continuation: steps one floor toward `destination` from the
    /// reported `current`, or stops and opens the door on arrival.
    pub fn on_floor_reached(
        self,
        ctx: &mut ElevatorContext,
        current: u8,
        destination: u8,
    ) -> Result<(), ElevatorError> {
        ctx.check_floor(current)?;
        ctx.check_floor(destination)?;

        let going_up = match self {
            GoingUpClosed => true,
            GoingDownClosed => false,
            IdleClosed | DoorOpening | IdleOpen | DoorClosing | DoorBlocked => {
                return Err(ElevatorError::UncommittedDestination {
                    reported: destination,
                    committed: None,
                })
            }
        };
        if ctx.destination() != Some(destination) {
            return Err(ElevatorError::UncommittedDestination {
                reported: destination,
                committed: ctx.destination(),
            });
        }

        if current == destination {
            ctx.diagnostics().info(
                "Destination Reached",
                &format!("Now at the destination {}F.", destination),
            );
            ctx.elevator_motor().go_brake();
            ctx.clear_destination();
            ctx.set_state(IdleClosed);
            ctx.set_arrival_door_open(true);
            ctx.door_motor().go_open();
            return Ok(());
        }

        // The next floor is validated before the motor is commanded, so a
        // rejected report leaves neither a command nor a state change behind.
        let (next, direction) = if going_up {
            (current.checked_add(1).unwrap_or(0), "up")
        } else {
            (current - 1, "down")
        };
        ctx.check_floor(next)?;

        ctx.diagnostics().info(
            "Floor Reached",
            &format!(
                "Now at {}F and destination is {}F. Continue to go {}.",
                current, destination, direction
            ),
        );
        if going_up {
            ctx.elevator_motor().go_up();
        } else {
            ctx.elevator_motor().go_down();
        }
        ctx.set_current_floor(next)
    }
}
