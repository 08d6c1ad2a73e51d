pub mod front;
pub mod stats;
