use contracts::tasks::StartedTask;
use serde::Serialize;

use crate::shared::api::{self, ApiError};

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    link: &'a str,
}

/// `POST scrape-images/` — asks the backend to scrape the product images
/// from a listing URL; answers the task id to poll.
pub async fn start_scrape(link: &str) -> Result<StartedTask, ApiError> {
    api::post_json("/scrape-images/", &ScrapeRequest { link }).await
}
