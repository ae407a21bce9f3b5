pub mod macros;
pub mod schedule;


pub use schedule::*;
