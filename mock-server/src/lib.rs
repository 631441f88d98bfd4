//! In-process emulator of the PetFriends REST API.
//!
//! Serves the same endpoints as the public deployment with the same
//! permissive validation: any string is accepted for name, type and age, only
//! missing fields are rejected. State lives in memory for the life of the
//! router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};

pub use config::{AccountConfig, MockConfig, DEMO_EMAIL, DEMO_PASSWORD};
pub use error::MockError;
pub use store::{Pet, PetList, Store};

pub type Db = Arc<RwLock<Store>>;

pub fn app(config: &MockConfig) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new(&config.accounts)));
    tracing::info!(accounts = config.accounts.len(), "emulator state initialized");
    Router::new()
        .route("/api/key", get(handlers::get_api_key))
        .route("/api/pets", get(handlers::list_pets).post(handlers::create_pet))
        .route("/api/create_pet_simple", post(handlers::create_pet_simple))
        .route("/api/pets/set_photo/{pet_id}", post(handlers::set_photo))
        .route(
            "/api/pets/{pet_id}",
            put(handlers::update_pet).delete(handlers::delete_pet),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(&config)).await
}
