//! Plain data carried by the state tree: catalog entries, cart lines, the signed-in
//! user, and application errors stored as data.

pub mod app_error;
pub mod cart;
pub mod product;
pub mod user;

pub use app_error::*;
pub use cart::*;
pub use product::*;
pub use user::*;
