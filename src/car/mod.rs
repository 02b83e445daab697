pub mod board;
pub mod controller;
pub mod controller_tests;
pub mod registry;

pub use board::{RequestBoard, RequestKind};
pub use controller::Car;
pub use registry::PassengerRegistry;
