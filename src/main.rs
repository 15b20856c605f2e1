use dotenv::dotenv;
use log::{info, warn};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use samuha_backend::routes;
use samuha_backend::services::store::Store;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    // Get port from the environment, default to 3030
    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str.parse().expect("PORT must be a number");
    info!("Using PORT: {}", port);

    // Load the seed data if a seed file is configured, otherwise start empty
    let store = match env::var("SEED_PATH") {
        Ok(path) => match Store::from_seed_path(&path) {
            Ok(store) => {
                info!("Loaded seed data from {}", path);
                store
            }
            Err(e) => {
                warn!("Failed to load seed data from {}: {}. Starting empty.", path, e);
                Store::empty()
            }
        },
        Err(_) => {
            warn!("$SEED_PATH not set, starting with an empty store");
            Store::empty()
        }
    };
    let store = Arc::new(store);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    // Set up routes
    let api = routes::routes(store).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
