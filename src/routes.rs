// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use serde::de::DeserializeOwned;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::{
    contacts::get_contacts,
    dashboard::get_dashboard,
    deposits::{create_deposit, get_member_deposits},
    loans::{
        approve_loan, create_loan_request, get_active_loans, get_loan_history,
        get_loan_requests, get_my_loan_history, mark_loan_paid, reject_loan,
    },
    members::{get_member, get_members},
    notices::{create_notice, delete_notice, get_notices},
    timeline::get_member_timeline,
};
use crate::services::store::Store;

// Add recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid request body".to_string();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query string".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
{
    warp::body::content_length_limit(16 * 1024).and(warp::body::json())
}

pub fn routes(store: Arc<Store>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());

    let members_route = warp::path!("members")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_members);

    let member_route = warp::path!("members" / u64)
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_member);

    let member_timeline_route = warp::path!("members" / u64 / "timeline")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_member_timeline);

    let member_deposits_route = warp::path!("members" / u64 / "deposits")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_member_deposits);

    let create_deposit_route = warp::path!("deposits")
        .and(warp::post())
        .and(store_filter.clone())
        .and(json_body())
        .and_then(create_deposit);

    let loan_request_route = warp::path!("loan-request")
        .and(warp::post())
        .and(store_filter.clone())
        .and(json_body())
        .and_then(create_loan_request);

    let my_loan_history_route = warp::path!("my-loan-history")
        .and(warp::get())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(get_my_loan_history);

    let loan_requests_route = warp::path!("admin" / "loan-requests")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_loan_requests);

    let active_loans_route = warp::path!("admin" / "loans" / "active")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_active_loans);

    let loan_history_route = warp::path!("admin" / "loan-history")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_loan_history);

    let approve_loan_route = warp::path!("admin" / "approve" / u64)
        .and(warp::post())
        .and(store_filter.clone())
        .and_then(approve_loan);

    let reject_loan_route = warp::path!("admin" / "reject" / u64)
        .and(warp::post())
        .and(store_filter.clone())
        .and_then(reject_loan);

    let mark_paid_route = warp::path!("admin" / "loans" / u64 / "mark-paid")
        .and(warp::post())
        .and(store_filter.clone())
        .and_then(mark_loan_paid);

    let notices_route = warp::path!("notice")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_notices);

    let create_notice_route = warp::path!("create-notice")
        .and(warp::post())
        .and(store_filter.clone())
        .and(json_body())
        .and_then(create_notice);

    let delete_notice_route = warp::path!("notice" / u64)
        .and(warp::delete())
        .and(store_filter.clone())
        .and_then(delete_notice);

    let contacts_route = warp::path!("contacts")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_contacts);

    let dashboard_route = warp::path!("admin" / "dashboard")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_dashboard);

    info!("All routes configured successfully.");

    members_route
        .or(member_route)
        .or(member_timeline_route)
        .or(member_deposits_route)
        .or(create_deposit_route)
        .or(loan_request_route)
        .or(my_loan_history_route)
        .or(loan_requests_route)
        .or(active_loans_route)
        .or(loan_history_route)
        .or(approve_loan_route)
        .or(reject_loan_route)
        .or(mark_paid_route)
        .or(notices_route)
        .or(create_notice_route)
        .or(delete_notice_route)
        .or(contacts_route)
        .or(dashboard_route)
        .recover(handle_rejection)
}
