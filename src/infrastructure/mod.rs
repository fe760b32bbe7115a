pub mod channels;
pub mod database;
pub mod media;
pub mod repositories;
pub mod time;
pub mod util;
