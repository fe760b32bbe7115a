pub mod articles;
pub mod channels;
pub mod media;
pub mod pagination;
pub mod serde_time;

pub use articles::ArticleDto;
pub use channels::{ChannelPostDto, TokenRefreshDto};
pub use media::UploadedMediaDto;
pub use pagination::{OffsetPage, SearchPage};
