// tests/support/mocks/mod.rs
pub mod articles;
pub mod channels;
pub mod media;
pub mod time;

pub use articles::*;
pub use channels::*;
pub use media::*;
pub use time::*;
