use chrono::{DateTime, Utc};
use pollbuddy_core::db::{ObjectId, Poll, Store};
use serde_json::Value;

use crate::{error::ErrorResponse, models::PollModel};

async fn load_poll(store: &dyn Store, id: &ObjectId) -> Result<Poll, ErrorResponse> {
    store
        .find_poll(id)
        .await?
        .ok_or_else(|| ErrorResponse::not_found("Poll not found"))
}

/// Whether `caller` administers `poll`, looking up its group when it has one.
pub async fn is_poll_admin(
    store: &dyn Store,
    poll: &Poll,
    caller: &ObjectId
) -> Result<bool, ErrorResponse> {
    let group = match &poll.group {
        Some(id) => store.find_group(id).await?,
        None => None
    };

    Ok(poll.is_admin(group.as_ref(), caller))
}

pub async fn get_poll(
    store: &dyn Store,
    id: &ObjectId,
    caller: Option<&ObjectId>,
    now: DateTime<Utc>
) -> Result<PollModel, ErrorResponse> {
    let poll = load_poll(store, id).await?;

    let is_admin = match caller {
        Some(caller) => is_poll_admin(store, &poll, caller).await?,
        None => false
    };

    let open = poll.is_open_at(now);

    Ok(PollModel::from_poll(poll, open, is_admin))
}

/// The question sub-document as relaxed extended json, with its id as hex.
pub async fn get_question(
    store: &dyn Store,
    poll_id: &ObjectId,
    question_id: &ObjectId
) -> Result<Value, ErrorResponse> {
    let poll = load_poll(store, poll_id).await?;

    let question = poll
        .question(question_id)
        .ok_or_else(|| ErrorResponse::not_found("Question not found"))?;

    let mut document = bson::doc! {"id": question.id.to_hex()};

    for (key, value) in &question.fields {
        document.insert(key.clone(), value.clone());
    }

    Ok(bson::Bson::Document(document).into_relaxed_extjson())
}
