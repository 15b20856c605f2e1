// src/handlers/dashboard.rs
use log::{debug, info};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::services::store::Store;

pub async fn get_dashboard(store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request for the admin dashboard summary");

    let summary = store.dashboard_summary().await;
    debug!(
        "Dashboard summary: {} active loans, {} pending requests",
        summary.active_loans, summary.pending_requests
    );

    Ok(warp::reply::json(&summary))
}
