use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use super::{AppState, DateParams};
use crate::api::models::{DatedResponse, NewsItem};
use crate::database::{self, records, reports, DbConn};

pub async fn get_word_cloud(State(state): State<Arc<AppState>>, Query(params): Query<DateParams>) -> impl IntoResponse {
    dated_report(&state, params.date, reports::word_cloud)
}

pub async fn get_source_heat(State(state): State<Arc<AppState>>, Query(params): Query<DateParams>) -> impl IntoResponse {
    dated_report(&state, params.date, reports::source_heat)
}

pub async fn get_source_sentiment(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> impl IntoResponse {
    dated_report(&state, params.date, reports::source_sentiment)
}

pub async fn get_news(State(state): State<Arc<AppState>>, Query(params): Query<DateParams>) -> impl IntoResponse {
    dated_report(&state, params.date, |conn, date| {
        let day = records::list_by_date(conn, date)?;
        Ok(day.into_iter().map(NewsItem::from).collect::<Vec<_>>())
    })
}

pub async fn get_daily_sentiment(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match reports::daily_weighted_sentiment(&mut conn) {
        Ok(daily) => Json(daily).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

/// Runs a per-date query for the requested day, or the latest stored one.
fn dated_report<T, F>(state: &AppState, date: Option<NaiveDate>, query: F) -> Response
where
    T: Serialize,
    F: FnOnce(&mut DbConn, NaiveDate) -> Result<Vec<T>>,
{
    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let date = match reports::resolve_date(&mut conn, date) {
        Ok(Some(date)) => date,
        Ok(None) => return Json(DatedResponse::<T>::empty()).into_response(),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    match query(&mut conn, date) {
        Ok(items) => Json(DatedResponse { date: Some(date), items }).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}
