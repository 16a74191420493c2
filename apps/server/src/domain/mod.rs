//! Domain layer: pure game logic, no I/O, no locks.

pub mod board;
pub mod scoring;
pub mod state;

#[cfg(test)]
mod tests_board;
#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use board::Board;
pub use state::{Phase, PlayerId};
