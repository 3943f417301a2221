pub mod product;
pub mod user;

pub use product::{Product, DEFAULT_MINIMUM_SETS};
pub use user::UserAccount;
