// src/handlers/deposits.rs
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::{with_status, Json};
use warp::Rejection;

use super::error::ApiError;
use crate::services::store::Store;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepositBody {
    pub member_id: u64,
    pub amount: f64,
}

pub async fn get_member_deposits(member_id: u64, store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to list deposits for member {}", member_id);

    let deposits = store.list_deposits(member_id).await.map_err(|e| {
        error!("Failed to list deposits for member {}: {}", member_id, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&deposits))
}

pub async fn create_deposit(
    store: Arc<Store>,
    body: NewDepositBody,
) -> Result<impl warp::Reply, Rejection> {
    info!(
        "Handling request to record deposit of {} for member {}",
        body.amount, body.member_id
    );

    let deposit = store
        .add_deposit(body.member_id, body.amount, Utc::now())
        .await
        .map_err(|e| {
            error!("Failed to record deposit: {}", e);
            warp::reject::custom(ApiError::from(e))
        })?;

    Ok(with_status(
        warp::reply::json(&deposit),
        warp::http::StatusCode::CREATED,
    ))
}
