pub mod user;

pub use user::{Envelope, LoginData, User};
