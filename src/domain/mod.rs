pub mod lookup;
pub mod order;
pub mod product;
pub mod user;

pub use lookup::*;
pub use order::*;
pub use product::*;
pub use user::*;
