// src/handlers/members.rs
use log::{error, info};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::store::Store;

pub async fn get_members(store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to list members");
    Ok(warp::reply::json(&store.list_members().await))
}

pub async fn get_member(member_id: u64, store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to get member {}", member_id);

    let member = store.get_member(member_id).await.map_err(|e| {
        error!("Failed to get member {}: {}", member_id, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&member))
}
