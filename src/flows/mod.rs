//! User-triggered action flows. Handlers never perform side effects
//! themselves; they return [`FlowOutcome`] values whose commands are
//! dispatched to an [`ActionExecutor`].

pub mod command;
pub mod controller;
pub mod navigation;

pub use command::{
    ActionCommand, ActionExecutor, FlowOutcome, PaymentMethod, RecordingExecutor, RequestType,
};
pub use controller::{
    HeaderController, HeaderUiState, HoldMenuRequest, NavigatingHeader, Observation,
};
pub use navigation::{Navigator, RecordingNavigator, Route};
