/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use driver_rust::elevio::elev::Elevator;
use std::io;
use std::sync::Arc;
use std::thread::Builder;

/* Custom libraries */
use elevator::{
    ChannelDoor, ChannelMotor, DoorCommand, DoorMotor, ElevatorContext, ElevatorMotor,
    ElevioDoor, ElevioMotor, ElevioSensors, LogDiagnostics, MotorCommand,
};
use shared::Status;
use simulator::{Environment, SensorSource, Stimulus};

/* Modules */
mod config;
mod display;
mod elevator;
mod shared;
mod simulator;

fn cli() -> Command<'static> {
    Command::new("elevator-sim")
        .about("Single car elevator controller driven by a simulated environment")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("max-floor")
                .long("max-floor")
                .takes_value(true)
                .help("Overrides elevator.max_floor from the configuration"),
        )
        .arg(
            Arg::new("hardware")
                .long("hardware")
                .help("Drive the elevio hardware server instead of simulating arrivals"),
        )
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = cli().get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = unwrap_or_exit!(config::load_config(config_path));
    if let Some(max_floor) = matches.value_of("max-floor") {
        config.elevator.max_floor = unwrap_or_exit!(max_floor.parse::<u8>());
        unwrap_or_exit!(config.validate());
    }
    let hardware = matches.is_present("hardware");

    // Initialize channels
    let (stimulus_tx, stimulus_rx) = cbc::unbounded::<Stimulus>();
    let (motor_command_tx, motor_command_rx) = cbc::unbounded::<MotorCommand>();
    let (door_command_tx, door_command_rx) = cbc::unbounded::<DoorCommand>();
    let (status_tx, status_rx) = cbc::unbounded::<Status>();
    let (sensors_terminate_tx, sensors_terminate_rx) = cbc::unbounded::<()>();

    // Actuators, optionally backed by the elevio driver
    let elevator_motor: Arc<dyn ElevatorMotor>;
    let door_motor: Arc<dyn DoorMotor>;
    let sensor_source;
    if hardware {
        let driver = unwrap_or_exit!(Elevator::init(
            &config.hardware.driver_address,
            config.elevator.max_floor
        ));
        log::info!("Connected to elevio driver at {}", config.hardware.driver_address);

        let sensors = ElevioSensors::new(
            driver.clone(),
            config.hardware.poll_period,
            stimulus_tx.clone(),
            sensors_terminate_rx,
        );
        unwrap_or_exit!(Builder::new()
            .name("elevio_sensors".into())
            .spawn(move || sensors.run()));

        elevator_motor = Arc::new(ElevioMotor::new(driver.clone(), ChannelMotor::new(motor_command_tx)));
        door_motor = Arc::new(ElevioDoor::new(driver, ChannelDoor::new(door_command_tx)));
        sensor_source = SensorSource::Hardware;
    } else {
        elevator_motor = Arc::new(ChannelMotor::new(motor_command_tx));
        door_motor = Arc::new(ChannelDoor::new(door_command_tx));
        sensor_source = SensorSource::Simulated;
    }

    // Create the car
    let ctx = unwrap_or_exit!(ElevatorContext::new(
        config.elevator.max_floor,
        config.elevator.initial_floor,
        elevator_motor,
        door_motor,
        Arc::new(LogDiagnostics),
    ))
    .with_status_channel(status_tx);

    // Start the environment
    let environment = Environment::new(
        ctx,
        &config.simulation,
        sensor_source,
        stimulus_rx,
        motor_command_rx,
        door_command_rx,
    );
    let environment_thread = unwrap_or_exit!(Builder::new()
        .name("environment".into())
        .spawn(move || environment.run()));

    // Start the display
    unwrap_or_exit!(Builder::new()
        .name("display".into())
        .spawn(move || display::render_status(status_rx)));
    unwrap_or_exit!(Builder::new()
        .name("console".into())
        .spawn(move || display::read_commands(io::stdin().lock(), stimulus_tx)));

    match environment_thread.join() {
        Ok(ctx) => log::info!(
            "Stopped at {}F, state: {}",
            ctx.current_floor(),
            ctx.state()
        ),
        Err(_) => log::error!("Environment thread panicked"),
    }
    let _ = sensors_terminate_tx.send(());
}
