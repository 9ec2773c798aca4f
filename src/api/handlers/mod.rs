use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::DbPool;

pub mod reports;

pub struct AppState {
    pub pool: DbPool,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    pub date: Option<NaiveDate>,
}
