use super::ArticleQueryService;
use crate::application::{
    dto::ArticleDto,
    error::{ApplicationError, ApplicationResult},
};

pub struct ArticlesByDateQuery {
    pub date: String,
}

impl ArticleQueryService {
    /// Articles whose editorial date falls on the given local day, newest first.
    pub async fn articles_by_date(&self, query: ArticlesByDateQuery) -> ApplicationResult<Vec<ArticleDto>> {
        let (start, end) = self.calendar.day_bounds(&query.date)?;
        let records = self
            .read_repo
            .find_by_date_range(start, end)
            .await
            .map_err(|err| ApplicationError::from(err).flatten())?;
        if records.is_empty() {
            return Err(ApplicationError::not_found(format!(
                "no articles published on {}",
                query.date.trim()
            )));
        }
        Ok(records.into_iter().map(Into::into).collect())
    }
}
