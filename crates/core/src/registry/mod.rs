pub mod classes;
pub mod defaults;
pub mod tokens;

pub use classes::ClassStore;
pub use defaults::{ComponentDefaults, DefaultBinding};
pub use tokens::TokenRegistry;
