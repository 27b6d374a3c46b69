//! 领域实体

mod category;
mod product;
mod variant;

pub use category::*;
pub use product::*;
pub use variant::*;
