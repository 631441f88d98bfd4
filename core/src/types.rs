//! Domain types for the PetFriends API.
//!
//! # Design
//! These mirror the emulator's schema but are defined independently so the
//! client can also talk to a live deployment. Optional server fields use
//! `#[serde(default)]`; the end-to-end suite catches schema drift.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Email/password pair used to request an auth key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Opaque token returned by `GET api/key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthKey(String);

impl AuthKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a successful `GET api/key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPayload {
    pub key: AuthKey,
}

/// Which pets a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PetFilter {
    /// Only pets owned by the caller.
    MyPets,
    #[default]
    AllPets,
}

impl PetFilter {
    /// Value sent as the `filter` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            PetFilter::MyPets => "my_pets",
            PetFilter::AllPets => "",
        }
    }
}

/// A pet record as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    /// `data:<type>;base64,...` URI, or empty when no photo is attached.
    #[serde(default)]
    pub pet_photo: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<serde_json::Value>,
}

impl Pet {
    pub fn has_photo(&self) -> bool {
        !self.pet_photo.is_empty()
    }
}

/// Body of `GET api/pets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

impl PetList {
    pub fn ids(&self) -> Vec<&str> {
        self.pets.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn contains(&self, pet_id: &str) -> bool {
        self.pets.iter().any(|p| p.id == pet_id)
    }
}

/// Fields submitted when creating a pet. Nothing is validated client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub animal_type: String,
    pub age: String,
}

impl NewPet {
    pub fn new(name: &str, animal_type: &str, age: &str) -> Self {
        Self {
            name: name.to_string(),
            animal_type: animal_type.to_string(),
            age: age.to_string(),
        }
    }

    pub(crate) fn form_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("name".to_string(), self.name.clone()),
            ("animal_type".to_string(), self.animal_type.clone()),
            ("age".to_string(), self.age.clone()),
        ]
    }
}

/// Fields submitted when updating a pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetUpdate {
    pub name: String,
    pub animal_type: String,
    pub age: String,
}

impl PetUpdate {
    pub fn new(name: &str, animal_type: &str, age: impl fmt::Display) -> Self {
        Self {
            name: name.to_string(),
            animal_type: animal_type.to_string(),
            age: age.to_string(),
        }
    }

    pub(crate) fn form_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("name".to_string(), self.name.clone()),
            ("animal_type".to_string(), self.animal_type.clone()),
            ("age".to_string(), self.age.clone()),
        ]
    }
}

/// Image payload for an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetPhoto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PetPhoto {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
            bytes,
        }
    }

    /// Read a photo from disk, deriving the content type from its extension.
    pub fn read(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path).map_err(|source| ApiError::Photo {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self::new(&file_name, bytes))
    }
}

/// Parsed response body: JSON when the server sent JSON, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

/// Status code plus parsed body, returned for every status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// True when the body is a JSON object with a member called `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.as_json()
            .and_then(|v| v.as_object())
            .is_some_and(|obj| obj.contains_key(name))
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.as_json()?.get(name)?.as_str()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        match &self.body {
            ResponseBody::Json(value) => T::deserialize(value)
                .map_err(|e| ApiError::Deserialization(e.to_string())),
            ResponseBody::Text(text) => Err(ApiError::Deserialization(format!(
                "expected JSON body, got text: {text}"
            ))),
        }
    }

    /// The key from a successful `get_api_key`, if present.
    pub fn auth_key(&self) -> Option<AuthKey> {
        self.json::<KeyPayload>().ok().map(|p| p.key)
    }
}
