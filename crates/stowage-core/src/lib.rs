pub mod config;
pub mod error;
pub mod schedule;
pub mod settings;
pub mod size;

#[cfg(test)]
mod tests;
#[cfg(test)]
mod testutil;
