//! Domain models for the Bookstall server.

pub mod product;
pub mod user;

pub use product::{NewProduct, Product};
pub use user::{User, UserProfile};
