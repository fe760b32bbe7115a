// src/application/services/mod.rs
pub mod fanout;
pub mod media;

use std::sync::Arc;

use crate::{
    application::{
        commands::{articles::ArticleCommandService, channels::ChannelCommandService},
        ports::{
            channel::{ChannelPublisher, SocialFeedChannel, TimelineChannel},
            media::MediaUploader,
            time::Clock,
            util::SlugGenerator,
        },
        queries::articles::ArticleQueryService,
    },
    domain::article::{
        ArticleReadRepository, ArticleWriteRepository, EditorialCalendar,
        services::ArticleSlugService,
    },
};

use self::{fanout::PublicationFanout, media::MediaCoordinator};

/// Everything the outer layers need, wired once at startup.
pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub channel_commands: Arc<ChannelCommandService>,
    pub media: Arc<MediaCoordinator>,
}

/// Outbound collaborators handed to [`ApplicationServices::new`].
pub struct Collaborators {
    pub uploader: Arc<dyn MediaUploader>,
    pub publishers: Vec<Arc<dyn ChannelPublisher>>,
    pub social_feed: Arc<dyn SocialFeedChannel>,
    pub timeline: Arc<dyn TimelineChannel>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        collaborators: Collaborators,
        fanout_timeout: std::time::Duration,
        links: fanout::ArticleLinks,
        calendar: EditorialCalendar,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let Collaborators {
            uploader,
            publishers,
            social_feed,
            timeline,
        } = collaborators;

        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&article_read_repo),
            slugger,
            Arc::clone(&clock),
        ));
        let media = Arc::new(MediaCoordinator::new(uploader));
        let fanout = Arc::new(PublicationFanout::new(publishers, fanout_timeout, links));

        let article_commands = Arc::new(ArticleCommandService::new(
            article_write_repo,
            Arc::clone(&article_read_repo),
            slug_service,
            Arc::clone(&media),
            fanout,
            calendar,
            clock,
        ));
        let article_queries = Arc::new(ArticleQueryService::new(article_read_repo, calendar));
        let channel_commands = Arc::new(ChannelCommandService::new(social_feed, timeline));

        Self {
            article_commands,
            article_queries,
            channel_commands,
            media,
        }
    }
}
