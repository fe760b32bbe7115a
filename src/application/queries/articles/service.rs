use std::sync::Arc;

use crate::domain::article::{ArticleReadRepository, EditorialCalendar};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) calendar: EditorialCalendar,
}

impl ArticleQueryService {
    pub fn new(read_repo: Arc<dyn ArticleReadRepository>, calendar: EditorialCalendar) -> Self {
        Self {
            read_repo,
            calendar,
        }
    }
}
