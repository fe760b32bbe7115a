pub mod articles;
pub mod channels;
pub mod uploads;
