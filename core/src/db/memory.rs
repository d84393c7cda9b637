use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Group, ObjectId, Poll, Store, StoreError, User};

/// Store kept entirely in process memory, with the same update semantics
/// as the mongo store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: RwLock<HashMap<ObjectId, Group>>,
    polls:  RwLock<HashMap<ObjectId, Poll>>,
    users:  RwLock<HashMap<ObjectId, User>>
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_group(&self, group: Group) {
        self.groups.write().insert(group.id, group);
    }

    pub fn put_poll(&self, poll: Poll) {
        self.polls.write().insert(poll.id, poll);
    }

    pub fn put_user(&self, user: User) {
        self.users.write().insert(user.id, user);
    }

    pub fn group(&self, id: &ObjectId) -> Option<Group> {
        self.groups.read().get(id).cloned()
    }

    pub fn poll(&self, id: &ObjectId) -> Option<Poll> {
        self.polls.read().get(id).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_group(
        &self,
        id: &ObjectId
    ) -> Result<Option<Group>, StoreError> {
        Ok(self.group(id))
    }

    async fn insert_group(&self, group: &Group) -> Result<ObjectId, StoreError> {
        self.put_group(group.clone());

        Ok(group.id)
    }

    async fn update_group_info(
        &self,
        id: &ObjectId,
        name: Option<String>,
        description: Option<String>
    ) -> Result<(), StoreError> {
        if let Some(group) = self.groups.write().get_mut(id) {
            if let Some(name) = name {
                group.name = name;
            }

            if let Some(description) = description {
                group.description = description;
            }
        }

        Ok(())
    }

    async fn add_group_member(
        &self,
        id: &ObjectId,
        user: &ObjectId
    ) -> Result<(), StoreError> {
        if let Some(group) = self.groups.write().get_mut(id) {
            if !group.members.contains(user) {
                group.members.push(*user);
            }
        }

        Ok(())
    }

    async fn remove_group_member(
        &self,
        id: &ObjectId,
        user: &ObjectId
    ) -> Result<(), StoreError> {
        if let Some(group) = self.groups.write().get_mut(id) {
            group.members.retain(|member| member != user);
        }

        Ok(())
    }

    async fn delete_group(&self, id: &ObjectId) -> Result<(), StoreError> {
        for poll in self.polls.write().values_mut() {
            if poll.group.as_ref() == Some(id) {
                poll.group = None;
            }
        }

        self.groups.write().remove(id);

        Ok(())
    }

    async fn find_poll(&self, id: &ObjectId) -> Result<Option<Poll>, StoreError> {
        Ok(self.poll(id))
    }

    async fn find_polls(
        &self,
        ids: &[ObjectId]
    ) -> Result<Vec<Poll>, StoreError> {
        let polls = self.polls.read();

        Ok(ids.iter().filter_map(|id| polls.get(id).cloned()).collect())
    }

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_users(
        &self,
        ids: &[ObjectId]
    ) -> Result<Vec<User>, StoreError> {
        let users = self.users.read();

        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}
