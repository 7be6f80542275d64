pub mod item;
pub mod logging;
pub mod vote;
