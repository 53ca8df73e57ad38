use gloo::storage::{LocalStorage, Storage};
use shared::{AuthTokens, CredentialStorage};

const ACCESS_KEY: &str = "access_token";
const REFRESH_KEY: &str = "refresh_token";

/// Credential pair persisted in `localStorage` across reloads
#[derive(Clone, Copy, Default)]
pub struct LocalCredentialStorage;

impl CredentialStorage for LocalCredentialStorage {
    fn load(&self) -> Option<AuthTokens> {
        let access: String = LocalStorage::get(ACCESS_KEY).ok()?;
        let refresh: String = LocalStorage::get(REFRESH_KEY).ok()?;
        Some(AuthTokens { access, refresh })
    }

    fn save(&self, tokens: &AuthTokens) {
        if let Err(e) = LocalStorage::set(ACCESS_KEY, &tokens.access)
            .and_then(|_| LocalStorage::set(REFRESH_KEY, &tokens.refresh))
        {
            log::warn!("Failed to persist credentials: {}", e);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(ACCESS_KEY);
        LocalStorage::delete(REFRESH_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_through_local_storage() {
        let storage = LocalCredentialStorage;
        storage.clear();
        assert_eq!(storage.load(), None);

        let tokens = AuthTokens {
            access: "a".to_string(),
            refresh: "r".to_string(),
        };
        storage.save(&tokens);
        assert_eq!(storage.load(), Some(tokens));

        storage.clear();
        assert_eq!(storage.load(), None);
    }
}
