//! Application services for generator session orchestration.

mod controller;

pub use controller::{
    ConnectRequest, SessionController, SessionControllerError, SessionControllerResult,
    SessionInfo,
};
