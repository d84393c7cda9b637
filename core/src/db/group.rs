use bson::oid::ObjectId;
#[cfg(feature = "mongo")]
use mongo_document::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mongo", derive(Document), document(collection = "groups"))]
pub struct Group {
    #[serde(rename = "_id")]
    pub id:          ObjectId,
    #[serde(rename = "Name")]
    pub name:        String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Admins", default)]
    pub admins:      Vec<ObjectId>,
    #[serde(rename = "Members", default)]
    pub members:     Vec<ObjectId>,
    #[serde(rename = "Polls", default)]
    pub polls:       Vec<ObjectId>
}

impl Group {
    /// A new group owned by `creator`, who is its only admin and not a
    /// member.
    pub fn new(name: String, description: String, creator: ObjectId) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            description,
            admins: vec![creator],
            members: Vec::new(),
            polls: Vec::new()
        }
    }

    pub fn is_admin(&self, user: &ObjectId) -> bool {
        self.admins.iter().any(|admin| admin == user)
    }

    pub fn is_member(&self, user: &ObjectId) -> bool {
        self.members.iter().any(|member| member == user)
    }

    /// Admins carry every member privilege, so either list grants access.
    pub fn is_user(&self, user: &ObjectId) -> bool {
        self.is_admin(user) || self.is_member(user)
    }
}
