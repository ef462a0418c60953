pub mod category;
pub mod node;
