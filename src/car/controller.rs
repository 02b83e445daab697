/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::{PassengerRegistry, RequestBoard, RequestKind};
use crate::config::CarConfig;
use crate::shared::{
    CarError, CarStatus, Floor, OperatingState, Passenger, PassengerId, PendingRequests,
};

/**
 * Controls a single elevator car.
 *
 * The `Car` takes requests from passengers inside the car and from hails on the floors,
 * records them on its request board, and runs an event loop on a dedicated thread that
 * sequences the car across them one goal floor at a time.
 *
 * # Fields
 * - `shared`:      State shared with the event loop (status, board, registry, subscribers).
 * - `wake_tx`:     Single-slot wake signal for an idle loop. Carries no floor; the loop rescans the board.
 * - `stop_tx`:     Single-slot stop signal. At most one outstanding stop is honored.
 * - `lifecycle`:   The event loop before `run`, its thread handle while running, nothing after `stop`.
 */
pub struct Car {
    shared: Arc<Shared>,
    wake_tx: cbc::Sender<()>,
    stop_tx: cbc::Sender<()>,
    lifecycle: Mutex<Lifecycle>,
}

struct Shared {
    config: CarConfig,
    status: RwLock<CarStatus>,
    board: Mutex<RequestBoard>,
    registry: Mutex<PassengerRegistry>,
    subscribers: Mutex<Vec<cbc::Sender<CarStatus>>>,
}

enum Lifecycle {
    Ready(EventLoop),
    Running(JoinHandle<()>),
    Stopped,
}

struct EventLoop {
    shared: Arc<Shared>,
    wake_rx: cbc::Receiver<()>,
    stop_rx: cbc::Receiver<()>,
}

enum Flow {
    Continue,
    Stop,
}

impl Car {
    pub fn new(config: CarConfig) -> Result<Car, CarError> {
        config.validate()?;

        let (wake_tx, wake_rx) = cbc::bounded::<()>(1);
        let (stop_tx, stop_rx) = cbc::bounded::<()>(1);

        let shared = Arc::new(Shared {
            status: RwLock::new(CarStatus::new(config.initial_floor)),
            board: Mutex::new(RequestBoard::new(config.bottom_floor, config.top_floor)),
            registry: Mutex::new(PassengerRegistry::new(config.capacity)),
            subscribers: Mutex::new(Vec::new()),
            config,
        });

        let event_loop = EventLoop {
            shared: Arc::clone(&shared),
            wake_rx,
            stop_rx,
        };

        Ok(Car {
            shared,
            wake_tx,
            stop_tx,
            lifecycle: Mutex::new(Lifecycle::Ready(event_loop)),
        })
    }

    /// Moves the car from ShutDown to Idle and starts the event loop. Only legal once.
    pub fn run(&self) -> Result<(), CarError> {
        let mut lifecycle = self.lifecycle.lock();
        let event_loop = match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::Ready(event_loop) => event_loop,
            other => {
                *lifecycle = other;
                return Err(CarError::AlreadyStarted);
            }
        };

        self.shared.update(|status| status.state = OperatingState::Idle);

        let spawned = Builder::new()
            .name("car_event_loop".into())
            .spawn(move || event_loop.run());

        match spawned {
            Ok(handle) => {
                *lifecycle = Lifecycle::Running(handle);
                Ok(())
            }
            Err(e) => {
                self.shared.update(|status| status.state = OperatingState::ShutDown);
                Err(CarError::Spawn(e.to_string()))
            }
        }
    }

    /// Signals the event loop to shut down and waits for it. Terminal.
    pub fn stop(&self) -> Result<(), CarError> {
        let mut lifecycle = self.lifecycle.lock();
        match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::Running(handle) => {
                // A full slot means a stop is already pending.
                let _ = self.stop_tx.try_send(());
                let joined = handle.join();
                // A panicked loop never reached its own shutdown transition.
                self.shared.update(|status| status.state = OperatingState::ShutDown);
                joined.map_err(|_| CarError::WorkerPanicked)
            }
            Lifecycle::Ready(event_loop) => {
                debug!("Stop ignored, event loop not started");
                *lifecycle = Lifecycle::Ready(event_loop);
                Ok(())
            }
            Lifecycle::Stopped => Ok(()),
        }
    }

    pub fn press_internal(&self, floor: Floor) {
        self.press(RequestKind::Internal, floor);
    }

    pub fn press_up_hail(&self, floor: Floor) {
        self.press(RequestKind::UpHail, floor);
    }

    pub fn press_down_hail(&self, floor: Floor) {
        self.press(RequestKind::DownHail, floor);
    }

    pub fn add_person(&self, passenger: Passenger) -> Result<(), CarError> {
        let id = passenger.id;
        let result = self.shared.registry.lock().admit(passenger);
        if let Err(e) = &result {
            warn!("Passenger {} not admitted: {}", id, e);
        }
        result
    }

    pub fn remove_person_by_id(&self, id: PassengerId) -> Result<Passenger, CarError> {
        let result = self.shared.registry.lock().remove(id);
        if let Err(e) = &result {
            warn!("Passenger {} not removed: {}", id, e);
        }
        result
    }

    /// Receives a status snapshot on every transition of the event loop.
    pub fn subscribe(&self) -> cbc::Receiver<CarStatus> {
        let (status_tx, status_rx) = cbc::unbounded::<CarStatus>();
        self.shared.subscribers.lock().push(status_tx);
        status_rx
    }

    pub fn status(&self) -> CarStatus {
        *self.shared.status.read()
    }

    pub fn state(&self) -> OperatingState {
        self.shared.status.read().state
    }

    pub fn current_floor(&self) -> Floor {
        self.shared.status.read().floor
    }

    pub fn pending(&self) -> PendingRequests {
        self.shared.board.lock().snapshot()
    }

    pub fn occupants(&self) -> Vec<PassengerId> {
        self.shared.registry.lock().ids()
    }

    pub fn capacity(&self) -> usize {
        self.shared.registry.lock().capacity()
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lifecycle.lock(), Lifecycle::Running(_))
    }

    fn press(&self, kind: RequestKind, floor: Floor) {
        // The read guard keeps the loop from changing state between recording and waking.
        let status = self.shared.status.read();
        if status.state == OperatingState::ShutDown {
            debug!("{:?} request for floor {} dropped, car is shut down", kind, floor);
            return;
        }

        if !self.shared.board.lock().record(kind, floor) {
            debug!("{:?} request for floor {} dropped", kind, floor);
            return;
        }
        debug!("{:?} request recorded for floor {}", kind, floor);

        if status.state == OperatingState::Idle {
            // A full slot already wakes the loop, and the loop rescans the whole board.
            let _ = self.wake_tx.try_send(());
        }
    }
}

impl Drop for Car {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Event loop did not shut down cleanly: {}", e);
        }
    }
}

impl Shared {
    fn update(&self, change: impl FnOnce(&mut CarStatus)) {
        let (before, after) = {
            let mut status = self.status.write();
            let before = *status;
            change(&mut *status);
            (before, *status)
        };
        if before != after {
            self.publish(after);
        }
    }

    fn publish(&self, status: CarStatus) {
        debug!("Car {:?} at floor {}", status.state, status.floor);
        self.subscribers
            .lock()
            .retain(|status_tx| status_tx.send(status).is_ok());
    }
}

impl EventLoop {
    fn run(self) {
        info!("Event loop started at floor {}", self.shared.status.read().floor);

        loop {
            match self.stop_rx.try_recv() {
                Err(cbc::TryRecvError::Empty) => (),
                // Either a stop signal or the car was dropped.
                _ => break,
            }

            self.shared.update(|status| status.state = OperatingState::Idle);

            let floor = self.shared.status.read().floor;
            let next = self.shared.board.lock().take_nearest(floor);

            match next {
                Some((kind, goal)) => {
                    if let Flow::Stop = self.serve(kind, goal) {
                        break;
                    }
                }
                None => {
                    let woken = cbc::select! {
                        recv(self.wake_rx) -> msg => msg.is_ok(),
                        recv(self.stop_rx) -> _ => false,
                    };
                    if !woken {
                        break;
                    }
                }
            }
        }

        self.shared.update(|status| status.state = OperatingState::ShutDown);
        info!("Event loop shut down at floor {}", self.shared.status.read().floor);
    }

    fn serve(&self, kind: RequestKind, goal: Floor) -> Flow {
        let floor = self.shared.status.read().floor;
        let travel = OperatingState::towards(floor, goal);
        info!("Serving {:?} request for floor {} from floor {}", kind, goal, floor);

        if !travel.is_moving() {
            // Already there; door handling belongs to the motion layer.
            self.shared.board.lock().complete(goal, travel);
            let status = *self.shared.status.read();
            self.shared.publish(status);
            return Flow::Continue;
        }

        self.shared.update(|status| status.state = travel);

        let duration = self.shared.config.travel_time(floor.abs_diff(goal));
        let stopped = cbc::select! {
            recv(self.stop_rx) -> _ => true,
            default(duration) => false,
        };
        if stopped {
            return Flow::Stop;
        }

        self.shared.board.lock().complete(goal, travel);
        self.shared.update(|status| {
            status.floor = goal;
            status.state = OperatingState::Idle;
        });
        Flow::Continue
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
