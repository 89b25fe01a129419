pub mod convert;
pub mod discover;
pub mod event_log;
pub mod output;

#[cfg(test)]
mod convert_tests;
