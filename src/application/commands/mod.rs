pub mod articles;
pub mod channels;
