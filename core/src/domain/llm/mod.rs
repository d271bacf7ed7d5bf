pub mod entities;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use entities::*;
pub use ports::*;
