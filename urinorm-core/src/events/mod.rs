mod queue;
mod types;

#[cfg(test)]
mod tests;

pub use queue::*;
pub use types::*;
