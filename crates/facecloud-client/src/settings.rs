//! Settings collaborator.
//!
//! The client reads backend location and login data from a
//! [`SettingsStore`] and writes back a token it obtains by logging in.
//! How a store persists its values is up to the implementation.

use std::sync::RwLock;

/// Source of backend and login settings.
pub trait SettingsStore: Send + Sync {
    fn url(&self) -> String;
    fn path(&self) -> String;
    fn email(&self) -> String;
    fn password(&self) -> String;
    fn token(&self) -> String;

    fn set_url(&self, url: &str);
    fn set_path(&self, path: &str);
    fn set_email(&self, email: &str);
    fn set_password(&self, password: &str);
    fn set_token(&self, token: &str);
}

#[derive(Debug, Clone, Default)]
struct SettingsData {
    url: String,
    path: String,
    email: String,
    password: String,
    token: String,
}

/// In-process settings store.
#[derive(Debug, Default)]
pub struct MemorySettings {
    data: RwLock<SettingsData>,
}

impl MemorySettings {
    /// Seed a store from environment variables; unset variables stay empty.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            data: RwLock::new(SettingsData {
                url: var("FACECLOUD_URL"),
                path: var("FACECLOUD_API_PATH"),
                email: var("FACECLOUD_EMAIL"),
                password: var("FACECLOUD_PASSWORD"),
                token: var("FACECLOUD_TOKEN"),
            }),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&SettingsData) -> T) -> T {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        f(&data)
    }

    fn write(&self, f: impl FnOnce(&mut SettingsData)) {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        f(&mut data)
    }
}

impl SettingsStore for MemorySettings {
    fn url(&self) -> String {
        self.read(|d| d.url.clone())
    }

    fn path(&self) -> String {
        self.read(|d| d.path.clone())
    }

    fn email(&self) -> String {
        self.read(|d| d.email.clone())
    }

    fn password(&self) -> String {
        self.read(|d| d.password.clone())
    }

    fn token(&self) -> String {
        self.read(|d| d.token.clone())
    }

    fn set_url(&self, url: &str) {
        self.write(|d| d.url = url.to_string())
    }

    fn set_path(&self, path: &str) {
        self.write(|d| d.path = path.to_string())
    }

    fn set_email(&self, email: &str) {
        self.write(|d| d.email = email.to_string())
    }

    fn set_password(&self, password: &str) {
        self.write(|d| d.password = password.to_string())
    }

    fn set_token(&self, token: &str) {
        self.write(|d| d.token = token.to_string())
    }
}
