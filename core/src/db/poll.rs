use bson::{DateTime, Document as BsonDocument, oid::ObjectId};
#[cfg(feature = "mongo")]
use mongo_document::Document;
use serde::{Deserialize, Serialize};

use super::Group;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mongo", derive(Document), document(collection = "polls"))]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id:         ObjectId,
    #[serde(rename = "Title")]
    pub title:      String,
    #[serde(rename = "OpenTime")]
    pub open_time:  DateTime,
    #[serde(rename = "CloseTime")]
    pub close_time: DateTime,
    #[serde(rename = "Questions", default)]
    pub questions:  Vec<Question>,
    #[serde(
        rename = "Group",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub group:      Option<ObjectId>,
    #[serde(
        rename = "Creator",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub creator:    Option<ObjectId>
}

/// Question content is stored as-is, only the id is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id:     ObjectId,
    #[serde(flatten)]
    pub fields: BsonDocument
}

impl Poll {
    /// Open strictly between OpenTime and CloseTime.
    pub fn is_open_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.open_time.to_chrono() < now && now < self.close_time.to_chrono()
    }

    pub fn question(&self, id: &ObjectId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    /// Group polls are administered by the group's admins, standalone polls
    /// by their creator. `group` must be the poll's own group, if any.
    pub fn is_admin(&self, group: Option<&Group>, user: &ObjectId) -> bool {
        match self.group {
            Some(group_id) => group
                .is_some_and(|group| group.id == group_id && group.is_admin(user)),
            None => self.creator.as_ref() == Some(user)
        }
    }
}
