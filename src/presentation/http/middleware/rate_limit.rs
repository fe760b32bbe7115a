// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Per-client-IP limiter: 10 requests/second with bursts of 20.
///
/// The client is taken from forwarding headers or `ConnectInfo<SocketAddr>`.
pub fn rate_limit_layer() -> Option<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>> {
    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(10);
    builder.burst_size(20);
    builder
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .map(GovernorLayer::new)
}
