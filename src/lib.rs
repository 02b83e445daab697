//! Control logic for a single elevator car: request intake, passenger bookkeeping and
//! the event loop that sequences the car across pending requests.

/* Modules */
pub mod car;
pub mod config;
pub mod shared;

pub use car::{Car, PassengerRegistry, RequestBoard, RequestKind};
pub use config::{CarConfig, Config};
pub use shared::{CarError, CarStatus, ConfigError, Floor, OperatingState, Passenger, PassengerId, PendingRequests};
