pub mod user;
pub mod order;
pub mod status;

pub use user::{CurrentUser, User};
pub use order::{Order, OrderItem};
pub use status::OrderStatus;
