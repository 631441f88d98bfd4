//! Blocking facade over `PetFriendsClient` and a `Transport`.
//!
//! One method per API operation. Each builds the request, executes it, and
//! hands back the status with the parsed body. A 403 or 500 is a normal
//! return value; `Err` means the exchange itself could not happen.

use std::fmt::Display;
use std::path::Path;

use tracing::debug;

use crate::client::PetFriendsClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{Transport, UreqTransport};
use crate::types::{ApiResponse, AuthKey, NewPet, PetFilter, PetPhoto, PetUpdate};

/// Blocking PetFriends client that performs its own I/O.
///
/// Pairs a `PetFriendsClient` with a `Transport` (ureq by default). Photo
/// paths are read from disk before the request is built. Any HTTP status
/// comes back as `Ok(ApiResponse)`.
pub struct PetFriends<T: Transport = UreqTransport> {
    client: PetFriendsClient,
    transport: T,
}

impl PetFriends<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> PetFriends<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: PetFriendsClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &PetFriendsClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request)?;
        Ok(self.client.parse_response(response))
    }

    pub fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse, ApiError> {
        debug!(email, "requesting api key");
        self.send(self.client.build_get_api_key(email, password))
    }

    pub fn get_list_of_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_list_of_pets(auth_key, filter))
    }

    pub fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        name: &str,
        animal_type: &str,
        age: &str,
        photo_path: impl AsRef<Path>,
    ) -> Result<ApiResponse, ApiError> {
        let photo = PetPhoto::read(photo_path.as_ref())?;
        let pet = NewPet::new(name, animal_type, age);
        self.send(self.client.build_add_new_pet(auth_key, &pet, photo))
    }

    pub fn add_new_pet_without_photo(
        &self,
        auth_key: &AuthKey,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResponse, ApiError> {
        let pet = NewPet::new(name, animal_type, age);
        self.send(self.client.build_add_new_pet_without_photo(auth_key, &pet))
    }

    pub fn add_foto_of_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo_path: impl AsRef<Path>,
    ) -> Result<ApiResponse, ApiError> {
        let photo = PetPhoto::read(photo_path.as_ref())?;
        self.send(self.client.build_add_foto_of_pet(auth_key, pet_id, photo))
    }

    /// `age` is sent in its `Display` form, so `2` and `"2"` are equivalent.
    pub fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: impl Display,
    ) -> Result<ApiResponse, ApiError> {
        let update = PetUpdate::new(name, animal_type, age);
        self.send(self.client.build_update_pet_info(auth_key, pet_id, &update))
    }

    pub fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_delete_pet(auth_key, pet_id))
    }
}
