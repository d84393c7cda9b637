#[cfg(feature = "mongo")]
use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use derive_more::{Display, Error, From};

use super::{Group, MongoError, Poll, User};

#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display("mongo error: {_0}")]
    Mongo(MongoError)
}

/// Every persistence call the service makes. Each method is a single
/// round trip; callers get no transactions.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_group(&self, id: &ObjectId)
    -> Result<Option<Group>, StoreError>;

    async fn insert_group(&self, group: &Group) -> Result<ObjectId, StoreError>;

    /// Overwrites whichever of name and description is given. Updating a
    /// group that no longer exists is a no-op.
    async fn update_group_info(
        &self,
        id: &ObjectId,
        name: Option<String>,
        description: Option<String>
    ) -> Result<(), StoreError>;

    /// Set-add, so racing joins leave a single entry.
    async fn add_group_member(
        &self,
        id: &ObjectId,
        user: &ObjectId
    ) -> Result<(), StoreError>;

    async fn remove_group_member(
        &self,
        id: &ObjectId,
        user: &ObjectId
    ) -> Result<(), StoreError>;

    /// Unsets the group reference on its polls, then deletes the group, so
    /// a failed call leaves the group in place to retry against.
    async fn delete_group(&self, id: &ObjectId) -> Result<(), StoreError>;

    async fn find_poll(&self, id: &ObjectId) -> Result<Option<Poll>, StoreError>;

    /// Polls in the order of `ids`, skipping ids with no document.
    async fn find_polls(&self, ids: &[ObjectId]) -> Result<Vec<Poll>, StoreError>;

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, StoreError>;

    /// Users in the order of `ids`, skipping ids with no document.
    async fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>, StoreError>;
}

/// Reorders a batch lookup to follow the requested ids. A repeated id
/// yields one entry per occurrence.
#[cfg(feature = "mongo")]
pub(crate) fn in_request_order<T: Clone>(
    ids: &[ObjectId],
    found: Vec<T>,
    id_of: impl Fn(&T) -> ObjectId
) -> Vec<T> {
    let found: HashMap<ObjectId, T> =
        found.into_iter().map(|item| (id_of(&item), item)).collect();

    ids.iter().filter_map(|id| found.get(id).cloned()).collect()
}
