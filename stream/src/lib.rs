pub mod config;
pub mod stream_api;

pub use config::{ConfigError, StreamConfig};
pub use stream_api::{
    AddCaptionQuery, ApiError, Error, ListVideoQuery, ListVideoResponse, StatusCategory,
    StreamClient, UpdateVideoQuery, Video,
};
