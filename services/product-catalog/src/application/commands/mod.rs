//! Commands

mod category_commands;
mod product_commands;

pub use category_commands::*;
pub use product_commands::*;
