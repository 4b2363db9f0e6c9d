pub mod config;
pub mod critique;
pub mod error;
pub mod journal;
pub mod models;
pub mod report;
#[cfg(test)]
pub mod test_helpers;
