use bson::oid::ObjectId;
#[cfg(feature = "mongo")]
use mongo_document::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mongo", derive(Document), document(collection = "users"))]
pub struct User {
    #[serde(rename = "_id")]
    pub id:        ObjectId,
    #[serde(rename = "UserName")]
    pub user_name: String
}
