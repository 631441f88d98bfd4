use std::collections::HashMap;

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::FormRejection, Multipart, Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    Form, Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{MockError, MockResult};
use crate::store::{Changes, Pet, PetList, Scope, UNKNOWN_USER};
use crate::Db;

const PHOTO_FIELD: &str = "pet_photo";

#[derive(Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
}

#[derive(Deserialize)]
pub struct NewPetForm {
    pub name: String,
    pub animal_type: String,
    pub age: String,
}

#[derive(Deserialize)]
pub struct UpdatePetForm {
    pub name: Option<String>,
    pub animal_type: Option<String>,
    pub age: Option<String>,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

async fn authenticate(db: &Db, headers: &HeaderMap) -> MockResult<String> {
    db.read().await.authenticate(header(headers, "auth_key"))
}

/// Text fields and the photo (as a data URI) of a multipart upload.
#[derive(Default)]
struct Upload {
    fields: HashMap<String, String>,
    photo: Option<String>,
}

impl Upload {
    async fn read(mut multipart: Multipart) -> MockResult<Self> {
        let mut upload = Upload::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or("image/jpeg").to_string();
            let is_file = field.file_name().is_some();
            let data = field.bytes().await?;
            if name == PHOTO_FIELD && is_file {
                upload.photo = Some(format!("data:{content_type};base64,{}", STANDARD.encode(&data)));
            } else {
                let text = String::from_utf8(data.to_vec())
                    .map_err(|_| MockError::BadRequest(format!("Field {name} is not valid UTF-8")))?;
                upload.fields.insert(name, text);
            }
        }
        Ok(upload)
    }

    fn take(&mut self, name: &str) -> MockResult<String> {
        self.fields
            .remove(name)
            .ok_or_else(|| MockError::BadRequest(format!("Field {name} is required")))
    }

    fn take_photo(&mut self) -> MockResult<String> {
        self.photo
            .take()
            .ok_or_else(|| MockError::BadRequest(format!("File {PHOTO_FIELD} is required")))
    }
}

pub async fn get_api_key(State(db): State<Db>, headers: HeaderMap) -> MockResult<Json<Value>> {
    let email = header(&headers, "email").unwrap_or_default();
    let password = header(&headers, "password").unwrap_or_default();
    let store = db.read().await;
    let key = store
        .key_for(email, password)
        .ok_or(MockError::Forbidden(UNKNOWN_USER))?;
    Ok(Json(json!({ "key": key })))
}

pub async fn list_pets(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> MockResult<Json<PetList>> {
    let user_id = authenticate(&db, &headers).await?;
    let scope = Scope::from_filter(query.filter.as_deref())?;
    let pets = db.read().await.list(&user_id, scope);
    Ok(Json(PetList { pets }))
}

pub async fn create_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> MockResult<Json<Pet>> {
    let user_id = authenticate(&db, &headers).await?;
    let mut upload = Upload::read(multipart?).await?;
    let name = upload.take("name")?;
    let animal_type = upload.take("animal_type")?;
    let age = upload.take("age")?;
    let photo = upload.take_photo()?;

    let pet = db
        .write()
        .await
        .insert(&user_id, name, animal_type, age, Some(photo));
    info!(pet_id = %pet.id, %user_id, "pet created with photo");
    Ok(Json(pet))
}

pub async fn create_pet_simple(
    State(db): State<Db>,
    headers: HeaderMap,
    form: Result<Form<NewPetForm>, FormRejection>,
) -> MockResult<Json<Pet>> {
    let user_id = authenticate(&db, &headers).await?;
    let Form(input) = form?;
    let pet = db
        .write()
        .await
        .insert(&user_id, input.name, input.animal_type, input.age, None);
    info!(pet_id = %pet.id, %user_id, "pet created");
    Ok(Json(pet))
}

pub async fn set_photo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> MockResult<Json<Pet>> {
    let user_id = authenticate(&db, &headers).await?;
    let photo = Upload::read(multipart?).await?.take_photo()?;
    let pet = db.write().await.set_photo(&user_id, &pet_id, photo)?;
    info!(%pet_id, "photo attached");
    Ok(Json(pet))
}

pub async fn update_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
    form: Result<Form<UpdatePetForm>, FormRejection>,
) -> MockResult<Json<Pet>> {
    let user_id = authenticate(&db, &headers).await?;
    let Form(input) = form?;
    let changes = Changes {
        name: input.name,
        animal_type: input.animal_type,
        age: input.age,
    };
    let pet = db.write().await.update(&user_id, &pet_id, changes)?;
    info!(%pet_id, "pet updated");
    Ok(Json(pet))
}

pub async fn delete_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
) -> MockResult<StatusCode> {
    let user_id = authenticate(&db, &headers).await?;
    db.write().await.remove(&user_id, &pet_id)?;
    info!(%pet_id, "pet deleted");
    Ok(StatusCode::OK)
}
