//! Users module - membership, progression, wishlists, savings goals.

mod users_errors;
mod users_model;
mod users_service;


pub use users_errors::UserError;
pub use users_model::{NewUser, Role, SavingsGoal, User};
pub use users_service::UserService;
