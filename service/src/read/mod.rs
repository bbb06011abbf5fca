//! Read entities definitions.

pub mod client;
pub mod dashboard;
pub mod property;

pub use self::dashboard::Stats;
