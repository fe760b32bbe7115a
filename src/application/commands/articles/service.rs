// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        ports::time::Clock,
        services::{fanout::PublicationFanout, media::MediaCoordinator},
    },
    domain::article::{
        ArticleReadRepository, ArticleWriteRepository, EditorialCalendar,
        services::{ArticleSlugService, TagExtractor},
    },
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) slug_service: Arc<ArticleSlugService>,
    pub(super) tags: TagExtractor,
    pub(super) media: Arc<MediaCoordinator>,
    pub(super) fanout: Arc<PublicationFanout>,
    pub(super) calendar: EditorialCalendar,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        slug_service: Arc<ArticleSlugService>,
        media: Arc<MediaCoordinator>,
        fanout: Arc<PublicationFanout>,
        calendar: EditorialCalendar,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            tags: TagExtractor,
            media,
            fanout,
            calendar,
            clock,
        }
    }
}
