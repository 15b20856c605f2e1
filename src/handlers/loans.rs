// src/handlers/loans.rs
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::{with_status, Json};
use warp::Rejection;

use super::error::ApiError;
use crate::models::LoanStatus;
use crate::services::store::Store;

fn default_interest_rate() -> f64 {
    10.0
}

fn default_duration_months() -> u32 {
    12
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoanRequestBody {
    pub member_id: u64,
    pub amount: f64,
    pub purpose: String,
    #[serde(default = "default_interest_rate")]
    pub interest_rate: f64,
    #[serde(default = "default_duration_months")]
    pub duration_months: u32,
}

#[derive(Debug, Deserialize)]
pub struct MemberQuery {
    pub member: u64,
}

pub async fn create_loan_request(
    store: Arc<Store>,
    body: NewLoanRequestBody,
) -> Result<impl warp::Reply, Rejection> {
    info!(
        "Handling loan request of {} for member {}",
        body.amount, body.member_id
    );

    let loan = store
        .create_loan_request(
            body.member_id,
            body.amount,
            body.purpose,
            body.interest_rate,
            body.duration_months,
            Utc::now(),
        )
        .await
        .map_err(|e| {
            error!("Failed to create loan request: {}", e);
            warp::reject::custom(ApiError::from(e))
        })?;

    Ok(with_status(
        warp::reply::json(&loan),
        warp::http::StatusCode::CREATED,
    ))
}

pub async fn get_loan_requests(store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to list pending loan requests");
    Ok(warp::reply::json(
        &store.loans_by_status(LoanStatus::Pending).await,
    ))
}

pub async fn get_active_loans(store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to list active loans");
    Ok(warp::reply::json(
        &store.loans_by_status(LoanStatus::Active).await,
    ))
}

pub async fn get_loan_history(store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to list full loan history");
    Ok(warp::reply::json(&store.all_loans().await))
}

pub async fn get_my_loan_history(
    query: MemberQuery,
    store: Arc<Store>,
) -> Result<Json, Rejection> {
    info!("Handling loan history request for member {}", query.member);

    let loans = store.loan_history(query.member).await.map_err(|e| {
        error!("Failed to list loans for member {}: {}", query.member, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&loans))
}

pub async fn approve_loan(loan_id: u64, store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to approve loan {}", loan_id);

    let loan = store.approve_loan(loan_id, Utc::now()).await.map_err(|e| {
        error!("Failed to approve loan {}: {}", loan_id, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&loan))
}

pub async fn reject_loan(loan_id: u64, store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to reject loan {}", loan_id);

    let loan = store.reject_loan(loan_id).await.map_err(|e| {
        error!("Failed to reject loan {}: {}", loan_id, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&loan))
}

pub async fn mark_loan_paid(loan_id: u64, store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to mark loan {} paid", loan_id);

    let loan = store.mark_paid(loan_id).await.map_err(|e| {
        error!("Failed to mark loan {} paid: {}", loan_id, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&loan))
}
