use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    reports::{get_daily_sentiment, get_news, get_source_heat, get_source_sentiment, get_word_cloud},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/wordcloud", get(get_word_cloud))
        .route("/api/sources/heat", get(get_source_heat))
        .route("/api/sentiment/daily", get(get_daily_sentiment))
        .route("/api/sentiment/sources", get(get_source_sentiment))
        .route("/api/news", get(get_news))
        .with_state(state)
}
