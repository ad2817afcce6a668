pub mod counted;
pub mod panic;
