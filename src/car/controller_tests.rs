/*
 * Unit tests for the car controller
 *
 * The unit tests follows the Arrange, Act, Assert pattern. Transitions of the event loop
 * are observed through the status channel returned by `Car::subscribe`.
 *
 * Tests:
 * - test_car_init
 * - test_run_twice
 * - test_press_internal_above / below / same floor
 * - test_edge_floor_hails
 * - test_intake_while_shut_down
 * - test_stop_is_terminal
 * - test_drop_shuts_down
 * - test_scenario_press_then_stop
 * - test_scenario_capacity_one
 * - test_burst_of_requests_is_served
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod controller_tests {
    use crate::car::Car;
    use crate::config::CarConfig;
    use crate::shared::OperatingState::{Idle, MovingDown, MovingUp, ShutDown};
    use crate::shared::{CarError, CarStatus, Passenger, PendingRequests};
    use crossbeam_channel::{Receiver, RecvTimeoutError};
    use std::collections::BTreeSet;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(3);

    fn setup_car(initial_floor: i32, floor_travel_time: u64) -> (Car, Receiver<CarStatus>) {
        // Default configuration
        let config = CarConfig {
            capacity: 4,
            initial_floor,
            top_floor: 10,
            bottom_floor: 1,
            floor_travel_time,
        };

        let car = Car::new(config).unwrap();
        let status_rx = car.subscribe();
        (car, status_rx)
    }

    fn next_status(status_rx: &Receiver<CarStatus>) -> CarStatus {
        match status_rx.recv_timeout(TIMEOUT) {
            Ok(status) => status,
            Err(RecvTimeoutError::Timeout) => panic!("Timed out waiting for status_rx"),
            Err(e) => panic!("Error receiving from status_rx: {:?}", e),
        }
    }

    fn assert_quiet(status_rx: &Receiver<CarStatus>) {
        match status_rx.recv_timeout(Duration::from_millis(200)) {
            Err(RecvTimeoutError::Timeout) => (),
            other => panic!("Unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_car_init() {
        // Purpose: Verify that a new car is shut down with nothing pending

        // Arrange & Act
        let (car, status_rx) = setup_car(3, 0);

        // Assert
        assert_eq!(car.state(), ShutDown);
        assert_eq!(car.current_floor(), 3);
        assert_eq!(car.capacity(), 4);
        assert!(car.pending().is_empty());
        assert!(car.occupants().is_empty());
        assert!(!car.is_running());

        car.run().unwrap();
        assert_eq!(next_status(&status_rx), CarStatus { state: Idle, floor: 3 });
        assert!(car.is_running());
    }

    #[test]
    fn test_invalid_config() {
        let config = CarConfig {
            capacity: 4,
            initial_floor: 1,
            top_floor: 1,
            bottom_floor: 1,
            floor_travel_time: 0,
        };

        assert!(matches!(Car::new(config), Err(CarError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_twice() {
        // Arrange
        let (car, _status_rx) = setup_car(1, 0);

        // Act
        let first = car.run();
        let second = car.run();
        car.stop().unwrap();
        let after_stop = car.run();

        // Assert
        assert_eq!(first, Ok(()));
        assert_eq!(second, Err(CarError::AlreadyStarted));
        assert_eq!(after_stop, Err(CarError::AlreadyStarted));
        assert_eq!(car.state(), ShutDown);
    }

    #[test]
    fn test_stop_before_run_is_ignored() {
        let (car, status_rx) = setup_car(1, 0);

        car.stop().unwrap();
        car.run().unwrap();

        assert_eq!(next_status(&status_rx).state, Idle);
        assert!(car.is_running());
    }

    #[test]
    fn test_press_internal_above() {
        // Purpose: A goal above the current floor moves the car up, then it arrives idle

        // Arrange
        let (car, status_rx) = setup_car(1, 0);
        car.run().unwrap();
        next_status(&status_rx);

        // Act
        car.press_internal(5);

        // Assert
        assert_eq!(next_status(&status_rx), CarStatus { state: MovingUp, floor: 1 });
        assert_eq!(next_status(&status_rx), CarStatus { state: Idle, floor: 5 });
        assert_eq!(car.current_floor(), 5);
        assert!(car.pending().is_empty());
    }

    #[test]
    fn test_press_internal_below() {
        // Arrange
        let (car, status_rx) = setup_car(8, 0);
        car.run().unwrap();
        next_status(&status_rx);

        // Act
        car.press_internal(2);

        // Assert
        assert_eq!(next_status(&status_rx), CarStatus { state: MovingDown, floor: 8 });
        assert_eq!(next_status(&status_rx), CarStatus { state: Idle, floor: 2 });
    }

    #[test]
    fn test_press_internal_same_floor() {
        // Purpose: A goal at the current floor is consumed without leaving Idle

        // Arrange
        let (car, status_rx) = setup_car(4, 0);
        car.run().unwrap();
        next_status(&status_rx);

        // Act
        car.press_internal(4);

        // Assert
        assert_eq!(next_status(&status_rx), CarStatus { state: Idle, floor: 4 });
        assert_eq!(car.state(), Idle);
        assert!(car.pending().is_empty());
        assert_quiet(&status_rx);
    }

    #[test]
    fn test_hails_move_the_car() {
        // Arrange
        let (car, status_rx) = setup_car(5, 0);
        car.run().unwrap();
        next_status(&status_rx);

        // Act & Assert
        car.press_up_hail(2);
        assert_eq!(next_status(&status_rx).state, MovingDown);
        assert_eq!(next_status(&status_rx), CarStatus { state: Idle, floor: 2 });

        car.press_down_hail(9);
        assert_eq!(next_status(&status_rx).state, MovingUp);
        assert_eq!(next_status(&status_rx), CarStatus { state: Idle, floor: 9 });
    }

    #[test]
    fn test_edge_floor_hails() {
        // Purpose: Up at the top floor and down at the bottom floor never register

        // Arrange
        let (car, status_rx) = setup_car(5, 0);
        car.run().unwrap();
        next_status(&status_rx);

        // Act
        car.press_up_hail(10);
        car.press_down_hail(1);
        car.press_internal(11);
        car.press_internal(0);

        // Assert
        assert!(car.pending().is_empty());
        assert_quiet(&status_rx);
        assert_eq!(car.state(), Idle);
    }

    #[test]
    fn test_intake_while_shut_down() {
        // Purpose: Intake before run leaves the board untouched

        // Arrange
        let (car, status_rx) = setup_car(5, 0);

        // Act
        car.press_internal(3);
        car.press_up_hail(3);
        car.press_down_hail(3);

        // Assert
        assert_eq!(car.pending(), PendingRequests::default());
        assert_eq!(car.state(), ShutDown);
        assert_quiet(&status_rx);
    }

    #[test]
    fn test_stop_is_terminal() {
        // Arrange
        let (car, status_rx) = setup_car(5, 0);
        car.run().unwrap();
        next_status(&status_rx);

        // Act
        car.stop().unwrap();
        car.stop().unwrap();
        car.press_internal(8);
        car.press_up_hail(2);
        car.press_down_hail(9);

        // Assert
        assert_eq!(next_status(&status_rx), CarStatus { state: ShutDown, floor: 5 });
        assert_eq!(car.state(), ShutDown);
        assert!(car.pending().is_empty());
        assert!(!car.is_running());
        assert_quiet(&status_rx);
    }

    #[test]
    fn test_drop_shuts_down() {
        // Purpose: Dropping a running car stops its event loop

        // Arrange
        let (car, status_rx) = setup_car(2, 0);
        car.run().unwrap();
        assert_eq!(next_status(&status_rx).state, Idle);

        // Act
        drop(car);

        // Assert
        assert_eq!(next_status(&status_rx), CarStatus { state: ShutDown, floor: 2 });
        assert!(matches!(
            status_rx.recv_timeout(TIMEOUT),
            Err(RecvTimeoutError::Disconnected)
        ));
    }

    #[test]
    fn test_scenario_press_then_stop() {
        // Purpose: capacity 4, floors 1-10, start at 1. Stop interrupts the trip up to 5.

        // Arrange
        let (car, status_rx) = setup_car(1, 10_000);
        car.run().unwrap();
        assert_eq!(next_status(&status_rx).state, Idle);

        // Act
        car.press_internal(5);
        assert_eq!(next_status(&status_rx).state, MovingUp);
        assert_eq!(car.state(), MovingUp);
        car.stop().unwrap();
        car.press_internal(3);

        // Assert
        assert_eq!(car.state(), ShutDown);
        assert_eq!(car.current_floor(), 1);
        assert!(car.pending().is_empty());
        assert_eq!(next_status(&status_rx).state, ShutDown);
    }

    #[test]
    fn test_scenario_capacity_one() {
        // Arrange
        let config = CarConfig {
            capacity: 1,
            initial_floor: 1,
            top_floor: 10,
            bottom_floor: 1,
            floor_travel_time: 0,
        };
        let car = Car::new(config).unwrap();

        // Act
        let first = car.add_person(Passenger::new(1));
        let second = car.add_person(Passenger::new(2));

        // Assert
        assert_eq!(first, Ok(()));
        assert_eq!(second, Err(CarError::Overweight));
        assert_eq!(car.occupants(), vec![1]);
    }

    #[test]
    fn test_remove_from_empty_car() {
        let (car, _status_rx) = setup_car(1, 0);

        assert_eq!(car.remove_person_by_id(42), Err(CarError::Empty));

        car.add_person(Passenger::new(7)).unwrap();
        assert_eq!(car.remove_person_by_id(42), Err(CarError::PersonNotFound(42)));
        assert_eq!(car.remove_person_by_id(7), Ok(Passenger::new(7)));
        assert!(car.occupants().is_empty());
    }

    #[test]
    fn test_requests_while_moving_are_served() {
        // Purpose: Requests recorded while the car travels are picked up once it is idle

        // Arrange
        let (car, status_rx) = setup_car(1, 50);
        car.run().unwrap();
        next_status(&status_rx);

        // Act
        car.press_internal(3);
        assert_eq!(next_status(&status_rx).state, MovingUp);
        car.press_down_hail(2);

        // Assert
        assert_eq!(next_status(&status_rx), CarStatus { state: Idle, floor: 3 });
        assert_eq!(next_status(&status_rx).state, MovingDown);
        assert_eq!(next_status(&status_rx), CarStatus { state: Idle, floor: 2 });
        assert!(car.pending().is_empty());
    }

    #[test]
    fn test_burst_of_requests_is_served() {
        // Purpose: Concurrent presses of the same kind all get served, none are stranded

        // Arrange
        let (car, status_rx) = setup_car(1, 0);
        car.run().unwrap();
        next_status(&status_rx);

        // Act
        std::thread::scope(|s| {
            for floor in 2..=10 {
                let car = &car;
                s.spawn(move || car.press_internal(floor));
            }
        });

        let mut visited = BTreeSet::new();
        loop {
            let status = next_status(&status_rx);
            if status.state == Idle {
                visited.insert(status.floor);
            }
            if visited.len() == 9 {
                break;
            }
        }

        // Assert
        assert_eq!(visited, (2..=10).collect::<BTreeSet<i32>>());
        assert!(car.pending().is_empty());
    }
}
