use crate::database::{Database, DbError};
use crate::modules::register::database::RegistrationDatabase;
use std::path::Path;

#[derive(Debug)]
pub struct Databases {
    pub registrations: Database<RegistrationDatabase>,
}

impl Databases {
    pub async fn open(data_dir: &Path) -> Result<Self, DbError> {
        Ok(Self {
            registrations: Database::open(data_dir.join("registrations.db")).await?,
        })
    }
}
