//! In-memory state of the emulator: accounts with their keys, and pets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AccountConfig;
use crate::error::{MockError, MockResult};

pub const NO_AUTH_HEADER: &str = "Please provide 'auth_key' Header";
pub const BAD_AUTH_KEY: &str = "Please provide a valid 'auth_key' Header";
pub const UNKNOWN_USER: &str = "This user wasn't found in database";
pub const NOT_OWNER: &str = "This pet belongs to another user";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    key: String,
    user_id: String,
}

/// Which pets `list` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Mine,
    All,
}

impl Scope {
    /// `my_pets` scopes to the caller; empty or absent means everyone.
    pub fn from_filter(filter: Option<&str>) -> MockResult<Self> {
        match filter.unwrap_or("") {
            "" => Ok(Scope::All),
            "my_pets" => Ok(Scope::Mine),
            _ => Err(MockError::BadRequest("Filter value is incorrect".to_string())),
        }
    }
}

/// Fields replaced by an update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct Changes {
    pub name: Option<String>,
    pub animal_type: Option<String>,
    pub age: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    accounts: Vec<Account>,
    /// Newest first.
    pets: Vec<Pet>,
}

impl Store {
    pub fn new(accounts: &[AccountConfig]) -> Self {
        let accounts = accounts
            .iter()
            .map(|a| Account {
                email: a.email.clone(),
                password: a.password.clone(),
                key: Uuid::new_v4().simple().to_string(),
                user_id: Uuid::new_v4().to_string(),
            })
            .collect();
        Self {
            accounts,
            pets: Vec::new(),
        }
    }

    /// The account's key; repeated logins get the same key.
    pub fn key_for(&self, email: &str, password: &str) -> Option<&str> {
        self.accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| a.key.as_str())
    }

    /// Resolve an `auth_key` header value to the owning user id.
    pub fn authenticate(&self, key: Option<&str>) -> MockResult<String> {
        let key = key.ok_or(MockError::Forbidden(NO_AUTH_HEADER))?;
        self.accounts
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.user_id.clone())
            .ok_or(MockError::Forbidden(BAD_AUTH_KEY))
    }

    pub fn list(&self, user_id: &str, scope: Scope) -> Vec<Pet> {
        self.pets
            .iter()
            .filter(|p| scope == Scope::All || p.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn insert(
        &mut self,
        user_id: &str,
        name: String,
        animal_type: String,
        age: String,
        pet_photo: Option<String>,
    ) -> Pet {
        let pet = Pet {
            id: Uuid::new_v4().to_string(),
            name,
            animal_type,
            age,
            pet_photo: pet_photo.unwrap_or_default(),
            user_id: user_id.to_string(),
            created_at: chrono::Utc::now().timestamp().to_string(),
        };
        self.pets.insert(0, pet.clone());
        pet
    }

    fn owned_index(&self, user_id: &str, pet_id: &str) -> MockResult<usize> {
        let index = self
            .pets
            .iter()
            .position(|p| p.id == pet_id)
            .ok_or_else(|| MockError::NotFound(format!("Pet with id {pet_id} wasn't found")))?;
        if self.pets[index].user_id != user_id {
            return Err(MockError::Forbidden(NOT_OWNER));
        }
        Ok(index)
    }

    /// Apply `changes`; empty strings count as "not provided".
    pub fn update(&mut self, user_id: &str, pet_id: &str, changes: Changes) -> MockResult<Pet> {
        let index = self.owned_index(user_id, pet_id)?;
        let pet = &mut self.pets[index];
        let provided = |v: Option<String>| v.filter(|s| !s.is_empty());
        if let Some(name) = provided(changes.name) {
            pet.name = name;
        }
        if let Some(animal_type) = provided(changes.animal_type) {
            pet.animal_type = animal_type;
        }
        if let Some(age) = provided(changes.age) {
            pet.age = age;
        }
        Ok(pet.clone())
    }

    pub fn set_photo(&mut self, user_id: &str, pet_id: &str, pet_photo: String) -> MockResult<Pet> {
        let index = self.owned_index(user_id, pet_id)?;
        let pet = &mut self.pets[index];
        pet.pet_photo = pet_photo;
        Ok(pet.clone())
    }

    pub fn remove(&mut self, user_id: &str, pet_id: &str) -> MockResult<Pet> {
        let index = self.owned_index(user_id, pet_id)?;
        Ok(self.pets.remove(index))
    }
}
