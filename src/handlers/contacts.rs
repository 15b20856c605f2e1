// src/handlers/contacts.rs
use log::info;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::services::store::Store;

pub async fn get_contacts(store: Arc<Store>) -> Result<Json, Rejection> {
    info!("Handling request to list contacts");
    Ok(warp::reply::json(&store.list_contacts().await))
}
