use async_trait::async_trait;
use mongodb::{Client, Database, bson::Document as BsonDocument};
use opentelemetry::{
    global,
    trace::{FutureExt, Tracer}
};

use super::{
    Group,
    MongoError,
    ObjectId,
    Poll,
    Store,
    StoreError,
    User,
    doc,
    store::in_request_order
};
use crate::env::env;

/// Connects to the configured database. The handle is returned to the
/// caller rather than stashed in a global.
pub async fn init_mongo(
    ping: bool
) -> Result<Database, Box<dyn std::error::Error>> {
    let tracer = global::tracer("");

    let mongo = tracer
        .in_span("initializing mongo", |cx| {
            async {
                let mongo = Client::with_uri_str(&env().mongo_url)
                    .await?
                    .database(&env().mongo_database);

                // ? creating the client doesn't connect, so ping to fail
                // ? at startup instead of on the first request
                if ping {
                    mongo.run_command(doc! {"ping": 1}).await?;
                }

                Ok::<Database, MongoError>(mongo)
            }
            .with_context(cx)
        })
        .await?;

    Ok(mongo)
}

#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn find_group(
        &self,
        id: &ObjectId
    ) -> Result<Option<Group>, StoreError> {
        Ok(Group::find_one(&self.db, doc! {"_id": *id}).await?)
    }

    async fn insert_group(&self, group: &Group) -> Result<ObjectId, StoreError> {
        Group::insert_one(&self.db, group).await?;

        Ok(group.id)
    }

    async fn update_group_info(
        &self,
        id: &ObjectId,
        name: Option<String>,
        description: Option<String>
    ) -> Result<(), StoreError> {
        let mut set = BsonDocument::new();

        if let Some(name) = name {
            set.insert("Name", name);
        }

        if let Some(description) = description {
            set.insert("Description", description);
        }

        if set.is_empty() {
            return Ok(());
        }

        Group::update_one(&self.db, doc! {"_id": *id}, doc! {"$set": set})
            .await?;

        Ok(())
    }

    async fn add_group_member(
        &self,
        id: &ObjectId,
        user: &ObjectId
    ) -> Result<(), StoreError> {
        Group::update_one(
            &self.db,
            doc! {"_id": *id},
            doc! {"$addToSet": {"Members": *user}}
        )
        .await?;

        Ok(())
    }

    async fn remove_group_member(
        &self,
        id: &ObjectId,
        user: &ObjectId
    ) -> Result<(), StoreError> {
        Group::update_one(
            &self.db,
            doc! {"_id": *id},
            doc! {"$pull": {"Members": *user}}
        )
        .await?;

        Ok(())
    }

    async fn delete_group(&self, id: &ObjectId) -> Result<(), StoreError> {
        // ? detach polls first so a failure leaves the group in place
        // ? and the delete can be retried
        Poll::update_many(
            &self.db,
            doc! {"Group": *id},
            doc! {"$unset": {"Group": ""}}
        )
        .await?;

        Group::delete_one(&self.db, doc! {"_id": *id}).await?;

        Ok(())
    }

    async fn find_poll(&self, id: &ObjectId) -> Result<Option<Poll>, StoreError> {
        Ok(Poll::find_one(&self.db, doc! {"_id": *id}).await?)
    }

    async fn find_polls(
        &self,
        ids: &[ObjectId]
    ) -> Result<Vec<Poll>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let polls =
            Poll::find(&self.db, doc! {"_id": {"$in": ids.to_vec()}}).await?;

        Ok(in_request_order(ids, polls, |poll| poll.id))
    }

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(User::find_one(&self.db, doc! {"_id": *id}).await?)
    }

    async fn find_users(
        &self,
        ids: &[ObjectId]
    ) -> Result<Vec<User>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users =
            User::find(&self.db, doc! {"_id": {"$in": ids.to_vec()}}).await?;

        Ok(in_request_order(ids, users, |user| user.id))
    }
}
