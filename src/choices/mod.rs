//! Remote choice lists for dropdown questions

mod client;
mod traits;

pub use client::RestChoiceClient;
pub use traits::ChoiceSource;

#[cfg(test)]
pub use traits::MockChoiceSource;
