use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait EquipmentService {
    async fn get_equipment(&self) -> Result<Vec<Equipment>, ReadError>;
    async fn create_equipment(&self, name: Name) -> Result<Equipment, CreateError>;
    async fn modify_equipment(&self, id: EquipmentID, name: Name)
    -> Result<Equipment, UpdateError>;
    async fn delete_equipment(&self, id: EquipmentID) -> Result<EquipmentID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait EquipmentRepository {
    async fn read_equipment(&self) -> Result<Vec<Equipment>, ReadError>;
    async fn create_equipment(&self, name: Name) -> Result<Equipment, CreateError>;
    async fn modify_equipment(&self, id: EquipmentID, name: Name)
    -> Result<Equipment, UpdateError>;
    async fn delete_equipment(&self, id: EquipmentID) -> Result<EquipmentID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub id: EquipmentID,
    pub name: Name,
    pub created_at: DateTime<Utc>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EquipmentID(Uuid);

impl EquipmentID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for EquipmentID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for EquipmentID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
