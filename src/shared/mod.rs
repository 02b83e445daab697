pub mod error;
pub mod macros;
pub mod structs;

pub use error::CarError;
pub use error::ConfigError;
pub use structs::CarStatus;
pub use structs::Floor;
pub use structs::OperatingState;
pub use structs::Passenger;
pub use structs::PassengerId;
pub use structs::PendingRequests;
