use crate::configuration::Configuration;
use crate::raw::RawTables;
use crate::services::{DonationService, UserService};
use crate::storage::SqliteStorage;
use crate::wrapper::{DatabaseWrapper, SchemaValidator};

pub struct Context {
    pub config: Configuration,
    pub storage: SqliteStorage,
}

impl Context {
    pub fn new(config: Configuration, storage: SqliteStorage) -> Self {
        Self { config, storage }
    }

    pub fn wrapper(&self) -> DatabaseWrapper<SqliteStorage> {
        DatabaseWrapper::new(
            self.storage.clone(),
            SchemaValidator::new(self.config.max_field_len),
        )
    }

    pub fn raw(&self) -> RawTables<SqliteStorage> {
        RawTables::new(self.storage.clone())
    }

    pub fn users(&self) -> UserService<SqliteStorage> {
        UserService::new(self.storage.clone())
    }

    pub fn donations(&self) -> DonationService<SqliteStorage> {
        DonationService::new(self.storage.clone())
    }
}
