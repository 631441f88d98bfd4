//! Shared harness for the end-to-end scenarios.
//!
//! # Design
//! By default every `Suite` starts its own emulator on a random port, so
//! scenarios never see each other's pets and the parallel test harness is
//! safe. Setting `PETFRIENDS_BASE_URL` (plus credentials) points the suite at
//! a live deployment instead; run with `--test-threads=1` in that case.

#![allow(dead_code)]

use std::path::PathBuf;

use petfriends_core::{
    AuthKey, Credentials, PetFilter, PetFriends, PetList, Settings, DEFAULT_INVALID_EMAIL,
    DEFAULT_INVALID_PASSWORD,
};
use petfriends_mock::{MockConfig, DEMO_EMAIL, DEMO_PASSWORD};

pub struct Suite {
    pub pf: PetFriends,
    pub settings: Settings,
}

impl Suite {
    pub fn start() -> Self {
        let settings = if Settings::live_target_configured() {
            Settings::from_env().expect("live target needs PETFRIENDS_EMAIL and PETFRIENDS_PASSWORD")
        } else {
            let addr = spawn_emulator(MockConfig::default());
            Settings {
                base_url: format!("http://{addr}/"),
                valid: Credentials::new(DEMO_EMAIL, DEMO_PASSWORD),
                invalid: Credentials::new(DEFAULT_INVALID_EMAIL, DEFAULT_INVALID_PASSWORD),
            }
        };
        Self {
            pf: PetFriends::new(&settings.base_url),
            settings,
        }
    }

    pub fn auth_key(&self) -> AuthKey {
        let valid = &self.settings.valid;
        let resp = self.pf.get_api_key(&valid.email, &valid.password).unwrap();
        resp.auth_key()
            .unwrap_or_else(|| panic!("no key in response: {resp:?}"))
    }

    pub fn pets(&self, auth_key: &AuthKey, filter: PetFilter) -> PetList {
        let resp = self.pf.get_list_of_pets(auth_key, filter).unwrap();
        assert_eq!(resp.status, 200, "listing failed: {resp:?}");
        resp.json().unwrap()
    }

    /// Id of the caller's first pet; fails the test when there is none.
    pub fn first_own_pet_id(&self, auth_key: &AuthKey) -> String {
        let my_pets = self.pets(auth_key, PetFilter::MyPets);
        match my_pets.pets.first() {
            Some(pet) => pet.id.clone(),
            None => panic!("There is no my pets"),
        }
    }

    /// Like `first_own_pet_id`, but seeds a pet first if the collection is empty.
    pub fn ensure_own_pet(&self, auth_key: &AuthKey) -> String {
        if self.pets(auth_key, PetFilter::MyPets).pets.is_empty() {
            let resp = self
                .pf
                .add_new_pet(auth_key, "Котярыч", "Котяра", "2", photo("cat1.jpg"))
                .unwrap();
            assert_eq!(resp.status, 200, "seeding failed: {resp:?}");
        }
        self.first_own_pet_id(auth_key)
    }
}

/// Path of an image fixture under `tests/images`.
pub fn photo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("images")
        .join(name)
}

/// Start the emulator on a random port in a background thread.
pub fn spawn_emulator(config: MockConfig) -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            petfriends_mock::run(listener, config).await
        })
        .unwrap();
    });

    addr
}
