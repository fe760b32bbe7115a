use crate::application::ports::channel::Channel;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPostDto {
    #[schema(value_type = String)]
    pub channel: Channel,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefreshDto {
    #[schema(value_type = String)]
    pub channel: Channel,
    pub access_token: String,
}
