// src/handlers/timeline.rs
use log::{debug, error, info};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::store::Store;
use crate::services::timeline;

/// Cumulative deposit/loan series for one member, ready for the frontend
/// financial activity chart.
pub async fn get_member_timeline(member_id: u64, store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request for member {} timeline", member_id);

    let record = store.member_record(member_id).await.map_err(|e| {
        error!("Failed to load record for member {}: {}", member_id, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    let series = timeline::build_series(&record);
    debug!("Built {} timeline points for member {}", series.len(), member_id);

    Ok(warp::reply::json(&series))
}
