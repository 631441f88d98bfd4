//! Blocking client for the PetFriends pet-store API.
//!
//! # Overview
//! `PetFriendsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A `Transport`
//! executes the round-trip; `PetFriends` glues the two together and is what
//! callers normally use.
//!
//! # Design
//! - `PetFriendsClient` is stateless; it holds only `base_url`.
//! - Every operation yields an `ApiResponse` (status plus parsed body) for
//!   every status code. Errors are reserved for local failures.
//! - DTOs are defined independently from the emulator crate; the end-to-end
//!   suite catches schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod transport;
pub mod types;

pub use api::PetFriends;
pub use client::{PetFriendsClient, DEFAULT_BASE_URL};
pub use config::{Settings, DEFAULT_INVALID_EMAIL, DEFAULT_INVALID_PASSWORD};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use multipart::MultipartForm;
pub use transport::{Transport, UreqTransport};
pub use types::{
    ApiResponse, AuthKey, Credentials, KeyPayload, NewPet, Pet, PetFilter, PetList, PetPhoto,
    PetUpdate, ResponseBody,
};
