//! Stateless HTTP request builder and response parser for the PetFriends API.
//!
//! # Design
//! `PetFriendsClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation has a `build_*` method producing an
//! `HttpRequest`; every response goes through the single `parse_response`,
//! which never fails: the status code is data for the caller to assert on.

use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::multipart::MultipartForm;
use crate::types::{ApiResponse, AuthKey, NewPet, PetFilter, PetPhoto, PetUpdate, ResponseBody};

/// Base URL of the public PetFriends deployment.
pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru/";

const AUTH_HEADER: &str = "auth_key";
const PHOTO_FIELD: &str = "pet_photo";

/// Synchronous, stateless client for the PetFriends API.
///
/// Builds `HttpRequest` values and turns `HttpResponse` values into
/// `ApiResponse` without touching the network. The caller executes the HTTP
/// round-trip between `build_*` and `parse_response`.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: String,
}

impl Default for PetFriendsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PetFriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn authorized(&self, method: HttpMethod, path: &str, auth_key: &AuthKey) -> HttpRequest {
        HttpRequest {
            method,
            url: self.url(path),
            headers: vec![(AUTH_HEADER.to_string(), auth_key.as_str().to_string())],
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Credentials travel as request headers, not in the body.
    pub fn build_get_api_key(&self, email: &str, password: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url("api/key"),
            headers: vec![
                ("email".to_string(), email.to_string()),
                ("password".to_string(), password.to_string()),
            ],
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn build_get_list_of_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> HttpRequest {
        let mut req = self.authorized(HttpMethod::Get, "api/pets", auth_key);
        req.query
            .push(("filter".to_string(), filter.as_query().to_string()));
        req
    }

    pub fn build_add_new_pet(&self, auth_key: &AuthKey, pet: &NewPet, photo: PetPhoto) -> HttpRequest {
        let form = MultipartForm::new()
            .text("name", &pet.name)
            .text("animal_type", &pet.animal_type)
            .text("age", &pet.age)
            .file(PHOTO_FIELD, &photo.file_name, &photo.content_type, photo.bytes);
        let mut req = self.authorized(HttpMethod::Post, "api/pets", auth_key);
        req.body = RequestBody::Multipart(form);
        req
    }

    pub fn build_add_new_pet_without_photo(&self, auth_key: &AuthKey, pet: &NewPet) -> HttpRequest {
        let mut req = self.authorized(HttpMethod::Post, "api/create_pet_simple", auth_key);
        req.body = RequestBody::Form(pet.form_pairs());
        req
    }

    pub fn build_add_foto_of_pet(&self, auth_key: &AuthKey, pet_id: &str, photo: PetPhoto) -> HttpRequest {
        let form = MultipartForm::new().file(
            PHOTO_FIELD,
            &photo.file_name,
            &photo.content_type,
            photo.bytes,
        );
        let mut req = self.authorized(
            HttpMethod::Post,
            &format!("api/pets/set_photo/{pet_id}"),
            auth_key,
        );
        req.body = RequestBody::Multipart(form);
        req
    }

    pub fn build_update_pet_info(&self, auth_key: &AuthKey, pet_id: &str, update: &PetUpdate) -> HttpRequest {
        let mut req = self.authorized(HttpMethod::Put, &format!("api/pets/{pet_id}"), auth_key);
        req.body = RequestBody::Form(update.form_pairs());
        req
    }

    pub fn build_delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> HttpRequest {
        self.authorized(HttpMethod::Delete, &format!("api/pets/{pet_id}"), auth_key)
    }

    /// Turn any response into an `ApiResponse`; JSON when the body parses,
    /// raw text otherwise.
    pub fn parse_response(&self, response: HttpResponse) -> ApiResponse {
        let body = match serde_json::from_str(&response.body) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(response.body),
        };
        ApiResponse {
            status: response.status,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PetList;

    fn client() -> PetFriendsClient {
        PetFriendsClient::new("http://localhost:3000")
    }

    fn key() -> AuthKey {
        AuthKey::new("k3y")
    }

    fn photo() -> PetPhoto {
        PetPhoto::new("cat1.jpg", vec![1, 2, 3])
    }

    #[test]
    fn get_api_key_sends_credentials_as_headers() {
        let req = client().build_get_api_key("a@b.c", "pw");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/key");
        assert_eq!(req.header("email"), Some("a@b.c"));
        assert_eq!(req.header("password"), Some("pw"));
        assert!(req.header("auth_key").is_none());
        assert!(req.body.is_empty());
    }

    #[test]
    fn list_of_pets_carries_filter_and_key() {
        let req = client().build_get_list_of_pets(&key(), PetFilter::MyPets);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/pets");
        assert_eq!(req.query, vec![("filter".to_string(), "my_pets".to_string())]);
        assert_eq!(req.header("auth_key"), Some("k3y"));

        let req = client().build_get_list_of_pets(&key(), PetFilter::AllPets);
        assert_eq!(req.query, vec![("filter".to_string(), String::new())]);
    }

    #[test]
    fn add_new_pet_is_multipart_with_photo() {
        let pet = NewPet::new("Rex", "dog", "3");
        let req = client().build_add_new_pet(&key(), &pet, photo());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/pets");
        let RequestBody::Multipart(form) = &req.body else {
            panic!("expected multipart body, got {:?}", req.body);
        };
        let names: Vec<&str> = form.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "animal_type", "age", "pet_photo"]);
        let photo_part = form.part("pet_photo").unwrap();
        assert_eq!(photo_part.file_name.as_deref(), Some("cat1.jpg"));
        assert_eq!(photo_part.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(photo_part.data, vec![1, 2, 3]);
    }

    #[test]
    fn add_new_pet_without_photo_is_a_form() {
        let pet = NewPet::new("Rex", "", "");
        let req = client().build_add_new_pet_without_photo(&key(), &pet);
        assert_eq!(req.url, "http://localhost:3000/api/create_pet_simple");
        assert_eq!(req.body.form_value("name"), Some("Rex"));
        assert_eq!(req.body.form_value("animal_type"), Some(""));
        assert_eq!(req.body.form_value("age"), Some(""));
    }

    #[test]
    fn add_foto_targets_pet_id() {
        let req = client().build_add_foto_of_pet(&key(), "pet-1", photo());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/pets/set_photo/pet-1");
        let RequestBody::Multipart(form) = &req.body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.parts().len(), 1);
        assert!(form.part("pet_photo").unwrap().is_file());
    }

    #[test]
    fn update_and_delete_target_pet_id() {
        let update = PetUpdate::new("Tom", "cat", 5);
        let req = client().build_update_pet_info(&key(), "pet-9", &update);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/api/pets/pet-9");
        assert_eq!(req.body.form_value("age"), Some("5"));

        let req = client().build_delete_pet(&key(), "pet-9");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/api/pets/pet-9");
        assert!(req.body.is_empty());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PetFriendsClient::new(DEFAULT_BASE_URL);
        let req = client.build_get_api_key("e", "p");
        assert_eq!(req.url, "https://petfriends.skillfactory.ru/api/key");
    }

    #[test]
    fn parse_json_body() {
        let resp = client().parse_response(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"pets":[{"id":"1","name":"a","animal_type":"b","age":"2","pet_photo":""}]}"#
                .to_string(),
        });
        assert_eq!(resp.status, 200);
        let list: PetList = resp.json().unwrap();
        assert_eq!(list.pets[0].name, "a");
    }

    #[test]
    fn parse_error_page_as_text_without_failing() {
        let resp = client().parse_response(HttpResponse {
            status: 403,
            headers: Vec::new(),
            body: "<html>This user wasn't found in database</html>".to_string(),
        });
        assert_eq!(resp.status, 403);
        assert!(matches!(resp.body, ResponseBody::Text(ref t) if t.contains("wasn't found")));
    }

    #[test]
    fn parse_empty_body_as_text() {
        let resp = client().parse_response(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        });
        assert_eq!(resp.body, ResponseBody::Text(String::new()));
    }
}
