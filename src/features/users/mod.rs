//! The users feature: wire types, the UI state machine, the REST client, and
//! the controller that ties them together.

pub mod client;
pub mod controller;
pub mod state;
pub mod store;
pub mod types;

pub use client::{UsersApi, UsersClient};
pub use controller::UsersController;
pub use state::{FormMode, Generation, ListView, Submission, UsersState};
pub use store::StateStore;
pub use types::{User, UserDraft, UserId, UserPayload};
