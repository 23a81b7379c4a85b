mod controller;
mod state;

pub use controller::{ActionEffect, Transition, ViewAction, ViewController, ViewError};
pub use state::{ReadyView, ViewState};
