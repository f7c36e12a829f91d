/*
 * Unit tests for the elevator state machine
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - motion variants: floor steps, arrival, ignored stimuli
 * - idle family: departure, door cycle, blocked door
 * - contract violations: out of range floors, uncommitted destinations
 * - end to end trips through the dispatch entry points
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod state_tests {
    use crate::elevator::test_support::{Fixture, Severity};
    use crate::elevator::{DoorCommand, ElevatorError, MotorCommand};
    use crate::shared::ElevatorState::{
        DoorBlocked, DoorClosing, DoorOpening, GoingDownClosed, GoingUpClosed, IdleClosed,
        IdleOpen,
    };

    /// Idle at `floor` with the door fully open.
    fn open_at(max_floor: u8, floor: u8) -> Fixture {
        let mut f = Fixture::new(max_floor, floor);
        f.ctx.on_open_button_pressed();
        f.ctx.on_door_open();
        f.drain();
        f
    }

    #[test]
    fn test_going_down_steps_from_reported_floor() {
        // Arrange
        let mut f = Fixture::travelling(10, 8, 3);
        assert_eq!(f.ctx.state(), GoingDownClosed);

        // Act
        f.ctx.on_floor_reached(8, 3).unwrap();

        // Assert
        assert_eq!(f.ctx.current_floor(), 7);
        assert_eq!(f.ctx.state(), GoingDownClosed);
        assert_eq!(f.motor_commands(), vec![MotorCommand::Down]);
        assert!(f.door_commands().is_empty());
    }

    #[test]
    fn test_going_down_trusts_sensor_position() {
        // Arrange
        let mut f = Fixture::travelling(10, 8, 3);

        // Act: the sensor reports a floor the context did not track
        f.ctx.on_floor_reached(5, 3).unwrap();

        // Assert
        assert_eq!(f.ctx.current_floor(), 4);
        assert_eq!(f.motor_commands(), vec![MotorCommand::Down]);
    }

    #[test]
    fn test_going_up_steps_from_reported_floor() {
        // Arrange
        let mut f = Fixture::travelling(10, 2, 6);
        assert_eq!(f.ctx.state(), GoingUpClosed);

        // Act
        f.ctx.on_floor_reached(2, 6).unwrap();
        f.ctx.on_floor_reached(3, 6).unwrap();

        // Assert
        assert_eq!(f.ctx.current_floor(), 4);
        assert_eq!(f.motor_commands(), vec![MotorCommand::Up, MotorCommand::Up]);
    }

    #[test]
    fn test_arrival_brakes_and_opens_door() {
        for (from, to) in [(8, 3), (2, 6)] {
            // Arrange
            let mut f = Fixture::travelling(10, from, to);

            // Act
            f.ctx.on_floor_reached(to, to).unwrap();

            // Assert
            assert_eq!(f.ctx.state(), IdleClosed);
            assert_eq!(f.ctx.destination(), None);
            assert_eq!(f.motor_commands(), vec![MotorCommand::Brake]);
            assert_eq!(f.door_commands(), vec![DoorCommand::Open]);
        }
    }

    #[test]
    fn test_floor_button_rejected_while_moving() {
        for (from, to) in [(8, 3), (2, 6)] {
            // Arrange
            let mut f = Fixture::travelling(10, from, to);
            let state = f.ctx.state();

            // Act
            f.ctx.on_floor_button_pressed(9).unwrap();

            // Assert
            assert_eq!(f.ctx.state(), state);
            assert_eq!(f.ctx.current_floor(), from);
            assert!(f.ctx.requests().is_empty());
            assert_eq!(f.diagnostics.count(Severity::Info), 1);
            assert!(f.motor_commands().is_empty());
        }
    }

    #[test]
    fn test_door_blocked_ignored_while_moving() {
        // Arrange
        let mut f = Fixture::travelling(10, 2, 6);

        // Act
        f.ctx.on_door_blocked();

        // Assert
        assert_eq!(f.ctx.state(), GoingUpClosed);
        assert_eq!(f.ctx.current_floor(), 2);
        let (severity, title, _) = f.diagnostics.last().unwrap();
        assert_eq!(severity, Severity::Info);
        assert_eq!(title, "Invalid Operation");
        assert!(f.door_commands().is_empty());
    }

    #[test]
    fn test_door_signals_while_moving() {
        // Arrange
        let mut f = Fixture::travelling(10, 8, 3);

        // Act
        f.ctx.on_door_closed();
        f.ctx.on_door_open();

        // Assert
        assert_eq!(f.ctx.state(), GoingDownClosed);
        let entries = f.diagnostics.entries();
        assert_eq!(entries[0].0, Severity::Info);
        assert_eq!(entries[1].0, Severity::Error);
        assert!(f.door_commands().is_empty());
    }

    #[test]
    fn test_open_button_ignored_mid_transit() {
        // Arrange: car going down from 8 to 3, currently between 6 and 5
        let mut f = Fixture::travelling(10, 8, 3);
        f.ctx.on_floor_reached(8, 3).unwrap();
        f.ctx.on_floor_reached(7, 3).unwrap();
        f.drain();

        // Act
        f.ctx.on_open_button_pressed();
        f.ctx.on_close_button_pressed();

        // Assert
        assert_eq!(f.ctx.state(), GoingDownClosed);
        assert_eq!(f.ctx.current_floor(), 6);
        assert_eq!(f.diagnostics.count(Severity::Info), 2);
        assert_eq!(f.diagnostics.count(Severity::Error), 0);
        assert!(f.door_commands().is_empty());
        assert!(f.motor_commands().is_empty());
    }

    #[test]
    fn test_trip_from_first_to_fifth_floor() {
        // Arrange
        let mut f = Fixture::new(10, 1);

        // Act
        f.ctx.on_floor_button_pressed(5).unwrap();
        assert_eq!(f.ctx.state(), GoingUpClosed);
        for floor in 1..5 {
            f.ctx.on_floor_reached(floor, 5).unwrap();
            assert_eq!(f.ctx.current_floor(), floor + 1);
            assert_eq!(f.ctx.state(), GoingUpClosed);
        }
        f.ctx.on_floor_reached(5, 5).unwrap();

        // Assert
        assert_eq!(f.ctx.state(), IdleClosed);
        assert_eq!(f.ctx.current_floor(), 5);
        let mut expected = vec![MotorCommand::Up; 5];
        expected.push(MotorCommand::Brake);
        assert_eq!(f.motor_commands(), expected);
        assert_eq!(f.door_commands(), vec![DoorCommand::Open]);
    }

    #[test]
    fn test_floor_reached_out_of_range_fails() {
        // Arrange
        let mut f = Fixture::travelling(10, 2, 6);

        // Act
        let result = f.ctx.on_floor_reached(11, 6);

        // Assert
        assert_eq!(
            result,
            Err(ElevatorError::FloorOutOfRange {
                floor: 11,
                max_floor: 10
            })
        );
        assert_eq!(f.ctx.current_floor(), 2);
        assert_eq!(f.ctx.state(), GoingUpClosed);
        assert!(f.motor_commands().is_empty());
    }

    #[test]
    fn test_step_past_top_floor_fails() {
        // Arrange: sensor overshoots the destination and keeps climbing
        let mut f = Fixture::travelling(4, 1, 3);

        // Act
        let result = f.ctx.on_floor_reached(4, 3);

        // Assert
        assert!(matches!(result, Err(ElevatorError::FloorOutOfRange { floor: 5, .. })));
        assert_eq!(f.ctx.current_floor(), 1);
        assert!(f.motor_commands().is_empty());
    }

    #[test]
    fn test_step_past_bottom_floor_fails() {
        // Arrange: sensor reports the bottom floor while heading further down
        let mut f = Fixture::travelling(6, 4, 2);

        // Act
        let result = f.ctx.on_floor_reached(1, 2);

        // Assert
        assert_eq!(
            result,
            Err(ElevatorError::FloorOutOfRange {
                floor: 0,
                max_floor: 6
            })
        );
        assert_eq!(f.ctx.state(), GoingDownClosed);
        assert_eq!(f.ctx.current_floor(), 4);
        assert!(f.motor_commands().is_empty());
    }

    #[test]
    fn test_floor_reached_for_other_destination_fails() {
        // Arrange
        let mut f = Fixture::travelling(10, 2, 6);

        // Act
        let result = f.ctx.on_floor_reached(3, 7);

        // Assert
        assert_eq!(
            result,
            Err(ElevatorError::UncommittedDestination {
                reported: 7,
                committed: Some(6)
            })
        );
        assert_eq!(f.ctx.current_floor(), 2);
    }

    #[test]
    fn test_floor_reached_while_idle_fails() {
        // Arrange
        let mut f = Fixture::new(10, 4);

        // Act
        let result = f.ctx.on_floor_reached(4, 4);

        // Assert
        assert!(matches!(
            result,
            Err(ElevatorError::UncommittedDestination { committed: None, .. })
        ));
        assert_eq!(f.ctx.state(), IdleClosed);
    }

    #[test]
    fn test_floor_button_out_of_range_fails() {
        // Arrange
        let mut f = Fixture::new(10, 1);

        // Act
        let zero = f.ctx.on_floor_button_pressed(0);
        let above = f.ctx.on_floor_button_pressed(11);

        // Assert
        assert!(zero.is_err());
        assert!(above.is_err());
        assert_eq!(f.ctx.state(), IdleClosed);
        assert!(f.ctx.requests().is_empty());
        assert!(f.motor_commands().is_empty());
    }

    #[test]
    fn test_idle_closed_is_idempotent_on_closed_signal() {
        // Arrange
        let mut f = Fixture::new(10, 3);

        // Act
        for _ in 0..3 {
            f.ctx.on_door_closed();
        }

        // Assert
        assert_eq!(f.ctx.state(), IdleClosed);
        assert_eq!(f.ctx.current_floor(), 3);
        assert_eq!(f.diagnostics.count(Severity::Info), 3);
        assert!(f.door_commands().is_empty());
        assert!(f.motor_commands().is_empty());
    }

    #[test]
    fn test_floor_button_at_current_floor_opens_door() {
        // Arrange
        let mut f = Fixture::new(10, 3);

        // Act
        f.ctx.on_floor_button_pressed(3).unwrap();

        // Assert
        assert_eq!(f.ctx.state(), DoorOpening);
        assert_eq!(f.door_commands(), vec![DoorCommand::Open]);
        assert!(f.motor_commands().is_empty());
    }

    #[test]
    fn test_door_cycle() {
        // Arrange
        let mut f = Fixture::new(10, 3);

        // Act & Assert
        f.ctx.on_open_button_pressed();
        assert_eq!(f.ctx.state(), DoorOpening);
        f.ctx.on_door_open();
        assert_eq!(f.ctx.state(), IdleOpen);
        f.ctx.on_close_button_pressed();
        assert_eq!(f.ctx.state(), DoorClosing);
        f.ctx.on_door_closed();
        assert_eq!(f.ctx.state(), IdleClosed);

        assert_eq!(f.door_commands(), vec![DoorCommand::Open, DoorCommand::Close]);
        assert!(f.motor_commands().is_empty());
        assert_eq!(f.diagnostics.count(Severity::Error), 0);
    }

    #[test]
    fn test_blocked_door_is_held_and_reopened() {
        // Arrange
        let mut f = open_at(10, 2);

        // Act
        f.ctx.on_close_button_pressed();
        f.ctx.on_door_blocked();
        let blocked_state = f.ctx.state();
        f.ctx.on_door_blocked();
        f.ctx.on_open_button_pressed();

        // Assert
        assert_eq!(blocked_state, DoorBlocked);
        assert_eq!(f.ctx.state(), DoorOpening);
        assert_eq!(
            f.door_commands(),
            vec![DoorCommand::Close, DoorCommand::Hold, DoorCommand::Open]
        );
    }

    #[test]
    fn test_blocked_door_retries_closing() {
        // Arrange
        let mut f = open_at(10, 2);
        f.ctx.on_door_blocked();
        assert_eq!(f.ctx.state(), DoorBlocked);

        // Act
        f.ctx.on_close_button_pressed();
        f.ctx.on_door_closed();

        // Assert
        assert_eq!(f.ctx.state(), IdleClosed);
        assert_eq!(f.door_commands(), vec![DoorCommand::Hold, DoorCommand::Close]);
    }

    #[test]
    fn test_contradicting_door_signals_are_errors() {
        // Arrange
        let mut f = open_at(10, 2);

        // Act
        f.ctx.on_door_closed();
        f.ctx.on_close_button_pressed();
        f.ctx.on_door_open();

        // Assert
        assert_eq!(f.ctx.state(), DoorClosing);
        assert_eq!(f.diagnostics.count(Severity::Error), 2);
    }

    #[test]
    fn test_unexpected_door_open_while_idle_closed() {
        // Arrange
        let mut f = Fixture::new(10, 2);

        // Act
        f.ctx.on_door_open();

        // Assert
        assert_eq!(f.ctx.state(), IdleClosed);
        assert_eq!(f.diagnostics.count(Severity::Error), 1);
    }

    #[test]
    fn test_requests_queued_while_door_open_depart_after_close() {
        // Arrange
        let mut f = open_at(10, 5);

        // Act
        f.ctx.on_floor_button_pressed(7).unwrap();
        f.ctx.on_floor_button_pressed(3).unwrap();
        f.ctx.on_floor_button_pressed(7).unwrap();
        f.ctx.on_floor_button_pressed(5).unwrap();
        assert_eq!(f.ctx.state(), IdleOpen);
        assert_eq!(f.ctx.requests().pending(), vec![3, 7]);
        assert!(f.motor_commands().is_empty());

        f.ctx.on_close_button_pressed();
        f.ctx.on_door_closed();

        // Assert: 7 and 3 are equally far, the lower floor wins
        assert_eq!(f.ctx.state(), GoingDownClosed);
        assert_eq!(f.ctx.destination(), Some(3));
        assert_eq!(f.ctx.requests().pending(), vec![7]);
        assert_eq!(f.motor_commands(), vec![MotorCommand::Down]);
    }

    #[test]
    fn test_serves_queue_after_arrival() {
        // Arrange
        let mut f = Fixture::travelling(10, 1, 3);
        f.ctx.on_floor_reached(1, 3).unwrap();
        f.ctx.on_floor_reached(2, 3).unwrap();
        f.ctx.on_floor_reached(3, 3).unwrap();
        f.drain();

        // Act: a request while the door is still opening after arrival
        f.ctx.on_floor_button_pressed(6).unwrap();

        // Assert: the car does not move with the door in motion
        assert_eq!(f.ctx.state(), IdleClosed);
        assert!(f.motor_commands().is_empty());
        assert!(f.ctx.requests().contains(6));

        // Act: finish the door cycle
        f.ctx.on_door_open();
        f.ctx.on_close_button_pressed();
        f.ctx.on_door_closed();

        // Assert
        assert_eq!(f.ctx.state(), GoingUpClosed);
        assert_eq!(f.ctx.destination(), Some(6));
        assert!(f.ctx.requests().is_empty());
        assert_eq!(f.motor_commands(), vec![MotorCommand::Up]);
    }

    #[test]
    fn test_close_button_after_arrival_closes_opening_door() {
        // Arrange
        let mut f = Fixture::travelling(10, 4, 3);
        f.ctx.on_floor_reached(4, 3).unwrap();
        f.ctx.on_floor_reached(3, 3).unwrap();
        f.drain();

        // Act
        f.ctx.on_close_button_pressed();

        // Assert
        assert_eq!(f.ctx.state(), DoorClosing);
        assert_eq!(f.door_commands(), vec![DoorCommand::Close]);
    }
}
