//! View controller
//!
//! `state` holds the pure transition function for the three screens and the
//! add-item modal; `controller` runs the async work those transitions ask
//! for.

pub mod controller;
pub mod state;

pub use controller::Controller;
pub use state::{
    Action, AppState, AuthField, AuthForm, DraftField, DraftId, DraftItem, Effect, ModalState,
    View, MISSING_ITEM_FIELDS,
};
