pub mod board_controller;
pub mod gestures;
pub mod session;

pub use board_controller::{BoardController, DropOutcome, MoveError, PendingDrag};
pub use session::{ConnectionStatus, SessionModel};
