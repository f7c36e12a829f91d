use crate::config::SimulationConfig;
use crate::elevator::{DoorCommand, ElevatorContext, ElevatorError, MotorCommand};
use crate::shared::ElevatorState;
use crate::simulator::Stimulus;
use crossbeam_channel as cbc;
use std::time::{Duration, Instant};

/// Where arrival signals come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSource {
    /// Arrivals are synthesized `floor_travel_time` after each motor command.
    Simulated,
    /// Arrivals come from `Stimulus::FloorSensor` readings.
    Hardware,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DoorEvent {
    Opened,
    Closed,
    AutoClose,
}

/**
 * Simulated surroundings of the car.
 *
 * The environment owns the `ElevatorContext` and is its only caller, so every
 * event is processed to completion before the next one is taken. Actuator
 * commands coming back from the channel actuators are turned into delayed
 * sensor events: a running motor reaches the next floor after
 * `floor_travel_time`, a moving door reports open or closed after
 * `door_travel_time`, and an open door is closed again after
 * `door_open_time`.
 *
 * # Fields
 * - `ctx`:                 The car being simulated.
 * - `config`:              Simulation delays.
 * - `sensor_source`:       Whether arrivals are synthesized or read from hardware.
 * - `stimulus_rx`:         Button presses and sensor readings from outside.
 * - `motor_command_rx`:    Commands issued to the vertical motor.
 * - `door_command_rx`:     Commands issued to the door motor.
 * - `arrival_deadline`:    When the running motor reaches the next floor.
 * - `door_deadline`:       Next door event and when it fires.
 */
pub struct Environment {
    ctx: ElevatorContext,
    config: SimulationConfig,
    sensor_source: SensorSource,

    stimulus_rx: cbc::Receiver<Stimulus>,
    motor_command_rx: cbc::Receiver<MotorCommand>,
    door_command_rx: cbc::Receiver<DoorCommand>,

    arrival_deadline: Option<Instant>,
    door_deadline: Option<(DoorEvent, Instant)>,
}

impl Environment {
    pub fn new(
        ctx: ElevatorContext,
        config: &SimulationConfig,
        sensor_source: SensorSource,
        stimulus_rx: cbc::Receiver<Stimulus>,
        motor_command_rx: cbc::Receiver<MotorCommand>,
        door_command_rx: cbc::Receiver<DoorCommand>,
    ) -> Environment {
        Environment {
            ctx,
            config: config.clone(),
            sensor_source,
            stimulus_rx,
            motor_command_rx,
            door_command_rx,
            arrival_deadline: None,
            door_deadline: None,
        }
    }

    /// Runs until `Stimulus::Terminate` arrives or every stimulus sender is gone.
    /// Returns the context for inspection.
    pub fn run(mut self) -> ElevatorContext {
        log::info!(
            "Environment started at {}F, {} floors",
            self.ctx.current_floor(),
            self.ctx.max_floor()
        );

        loop {
            let terminate = cbc::select! {
                recv(self.stimulus_rx) -> stimulus => {
                    match stimulus {
                        Ok(Stimulus::Terminate) | Err(_) => true,
                        Ok(s) => {
                            self.handle_stimulus(s);
                            false
                        }
                    }
                }
                recv(self.motor_command_rx) -> command => {
                    if let Ok(c) = command {
                        self.handle_motor_command(c);
                    }
                    false
                }
                recv(self.door_command_rx) -> command => {
                    if let Ok(c) = command {
                        self.handle_door_command(c);
                    }
                    false
                }
                default(Duration::from_millis(self.config.tick)) => false,
            };
            if terminate {
                break;
            }

            self.drain_commands();
            self.fire_due_events(Instant::now());
        }

        log::info!("Environment stopped");
        self.ctx
    }

    fn handle_stimulus(&mut self, stimulus: Stimulus) {
        log::debug!("Stimulus {:?}", stimulus);
        let result = match stimulus {
            Stimulus::FloorButton(floor) => self.ctx.on_floor_button_pressed(floor),
            Stimulus::OpenButton => {
                self.ctx.on_open_button_pressed();
                Ok(())
            }
            Stimulus::CloseButton => {
                self.ctx.on_close_button_pressed();
                Ok(())
            }
            Stimulus::Block => {
                self.ctx.on_door_blocked();
                Ok(())
            }
            Stimulus::FloorSensor(floor) => self.relay_floor_reading(floor),
            Stimulus::Terminate => Ok(()),
        };

        if let Err(e) = result {
            log::error!("Rejected {:?}: {}", stimulus, e);
        }
    }

    fn report_floor(&mut self, floor: u8) -> Result<(), ElevatorError> {
        match self.ctx.destination() {
            Some(destination) if self.ctx.state().is_moving() => {
                self.ctx.on_floor_reached(floor, destination)
            }
            _ => {
                log::debug!("Floor sensor at {}F while not travelling", floor);
                Ok(())
            }
        }
    }

    /// Feeds a physical floor reading into the state machine.
    ///
    /// The state machine steps from the floor being left, so a reading first
    /// becomes a step from the neighbouring floor behind the car and, at the
    /// destination, a second report that stops the car on the reading.
    fn relay_floor_reading(&mut self, reading: u8) -> Result<(), ElevatorError> {
        let destination = match self.ctx.destination() {
            Some(destination) if self.ctx.state().is_moving() => destination,
            _ => {
                log::debug!("Floor sensor at {}F while not travelling", reading);
                return Ok(());
            }
        };

        self.ctx.check_floor(reading)?;
        let behind = match self.ctx.state() {
            ElevatorState::GoingUpClosed => reading.checked_sub(1),
            _ => reading.checked_add(1),
        };
        match behind {
            Some(floor) if floor != destination => {
                self.ctx.on_floor_reached(floor, destination)?
            }
            _ => log::warn!(
                "Floor sensor at {}F is past the destination {}F",
                reading,
                destination
            ),
        }

        if reading == destination {
            self.ctx.on_floor_reached(reading, destination)?;
        }
        Ok(())
    }

    fn handle_motor_command(&mut self, command: MotorCommand) {
        log::debug!("Motor {:?}", command);
        match command {
            MotorCommand::Up | MotorCommand::Down => {
                if self.sensor_source == SensorSource::Simulated {
                    self.arrival_deadline = Some(
                        Instant::now() + Duration::from_millis(self.config.floor_travel_time),
                    );
                }
            }
            MotorCommand::Brake => self.arrival_deadline = None,
        }
    }

    fn handle_door_command(&mut self, command: DoorCommand) {
        log::debug!("Door {:?}", command);
        let travel = Duration::from_millis(self.config.door_travel_time);
        self.door_deadline = match command {
            DoorCommand::Open => Some((DoorEvent::Opened, Instant::now() + travel)),
            DoorCommand::Close => Some((DoorEvent::Closed, Instant::now() + travel)),
            DoorCommand::Hold => None,
        };
    }

    /// Commands issued while handling the last event must be seen before any
    /// timer fires, or a stale door event could overtake a newer command.
    fn drain_commands(&mut self) {
        while let Ok(command) = self.motor_command_rx.try_recv() {
            self.handle_motor_command(command);
        }
        while let Ok(command) = self.door_command_rx.try_recv() {
            self.handle_door_command(command);
        }
    }

    fn fire_due_events(&mut self, now: Instant) {
        if let Some(deadline) = self.arrival_deadline {
            if deadline <= now {
                self.arrival_deadline = None;
                let floor = self.ctx.current_floor();
                if let Err(e) = self.report_floor(floor) {
                    log::error!("Arrival at {}F rejected: {}", floor, e);
                }
            }
        }

        if let Some((event, deadline)) = self.door_deadline {
            if deadline <= now {
                self.door_deadline = None;
                match event {
                    DoorEvent::Opened => {
                        self.ctx.on_door_open();
                        if self.ctx.state() == ElevatorState::IdleOpen {
                            let hold_open = Duration::from_millis(self.config.door_open_time);
                            self.door_deadline = Some((DoorEvent::AutoClose, now + hold_open));
                        }
                    }
                    DoorEvent::Closed => self.ctx.on_door_closed(),
                    DoorEvent::AutoClose => self.ctx.on_close_button_pressed(),
                }
            }
        }
    }
}
