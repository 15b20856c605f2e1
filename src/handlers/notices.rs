// src/handlers/notices.rs
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::{with_status, Json};
use warp::Rejection;

use super::error::ApiError;
use crate::services::store::Store;

#[derive(Debug, Deserialize)]
pub struct NewNoticeBody {
    pub title: String,
    pub body: String,
}

pub async fn get_notices(store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to list notices");
    Ok(warp::reply::json(&store.list_notices().await))
}

pub async fn create_notice(
    store: Arc<Store>,
    body: NewNoticeBody,
) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request to create notice: {}", body.title);

    let notice = store.create_notice(body.title, body.body, Utc::now()).await;

    Ok(with_status(
        warp::reply::json(&notice),
        warp::http::StatusCode::CREATED,
    ))
}

pub async fn delete_notice(
    notice_id: u64,
    store: Arc<Store>,
) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request to delete notice {}", notice_id);

    store.delete_notice(notice_id).await.map_err(|e| {
        error!("Failed to delete notice {}: {}", notice_id, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(with_status(
        warp::reply(),
        warp::http::StatusCode::NO_CONTENT,
    ))
}
