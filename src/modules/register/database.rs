use crate::{database::Database, modules::destiny::Platform};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::SystemTime};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub platform: Platform,
    pub membership_id: String,
    pub display_name: String,
    pub registered_at: SystemTime,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDatabase {
    pub accounts: HashMap<u64, Registration>,
}

impl Database<RegistrationDatabase> {
    pub async fn get_registration(&self, discord_id: u64) -> Option<Registration> {
        self.read(|db| db.accounts.get(&discord_id).cloned()).await
    }

    /// Stores the registration, returning whichever one it replaced.
    pub async fn register(
        &self,
        discord_id: u64,
        registration: Registration,
    ) -> Result<Option<Registration>, String> {
        self.transaction(|db| Ok(db.accounts.insert(discord_id, registration)))
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str) -> Registration {
        Registration {
            platform: Platform::Blizzard,
            membership_id: "4611686018467284386".into(),
            display_name: name.into(),
            registered_at: SystemTime::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn re_registering_replaces_the_old_account() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::<RegistrationDatabase>::open(dir.path().join("registrations.db"))
            .await
            .unwrap();

        assert_eq!(db.register(7, registration("Old#1")).await.unwrap(), None);
        let replaced = db.register(7, registration("New#2")).await.unwrap();

        assert_eq!(replaced.map(|r| r.display_name), Some("Old#1".to_string()));
        assert_eq!(
            db.get_registration(7).await.map(|r| r.display_name),
            Some("New#2".to_string())
        );
        assert_eq!(db.get_registration(8).await, None);
    }
}
