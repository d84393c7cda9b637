//! Group operations and their authorization gates.
//!
//! Every operation loads the group, checks the caller against its admin and
//! member lists, then makes at most one store mutation. A missing group is a
//! 404, a failed gate a 403 and any store failure a 500.

use chrono::{DateTime, Utc};
use pollbuddy_core::db::{Group, ObjectId, Store};

use crate::{
    error::ErrorResponse,
    models::{
        CreateGroupModel,
        CreatedModel,
        EditGroupModel,
        GroupModel,
        GroupUserModel,
        PollSummaryModel
    }
};

async fn load_group(
    store: &dyn Store,
    id: &ObjectId
) -> Result<Group, ErrorResponse> {
    store
        .find_group(id)
        .await?
        .ok_or_else(|| ErrorResponse::not_found("Group not found"))
}

pub async fn get_group(
    store: &dyn Store,
    id: &ObjectId,
    caller: Option<&ObjectId>
) -> Result<GroupModel, ErrorResponse> {
    let group = load_group(store, id).await?;

    let (is_member, is_admin) = match caller {
        Some(caller) => (group.is_member(caller), group.is_admin(caller)),
        None => (false, false)
    };

    Ok(GroupModel::from_group(group, is_member, is_admin))
}

pub async fn create_group(
    store: &dyn Store,
    caller: &ObjectId,
    data: CreateGroupModel
) -> Result<CreatedModel, ErrorResponse> {
    let group = Group::new(data.name, data.description, *caller);

    let id = store.insert_group(&group).await?;

    Ok(CreatedModel { id: id.to_hex() })
}

pub async fn edit_group(
    store: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId,
    data: EditGroupModel
) -> Result<(), ErrorResponse> {
    let group = load_group(store, id).await?;

    if !group.is_admin(caller) {
        return Err(ErrorResponse::forbidden());
    }

    store
        .update_group_info(&group.id, data.name, data.description)
        .await?;

    Ok(())
}

pub async fn get_group_members(
    store: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId
) -> Result<Vec<GroupUserModel>, ErrorResponse> {
    let group = load_group(store, id).await?;

    if !group.is_admin(caller) {
        return Err(ErrorResponse::forbidden());
    }

    Ok(store
        .find_users(&group.members)
        .await?
        .into_iter()
        .map(GroupUserModel::from_user)
        .collect())
}

pub async fn get_group_admins(
    store: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId
) -> Result<Vec<GroupUserModel>, ErrorResponse> {
    let group = load_group(store, id).await?;

    if !group.is_admin(caller) {
        return Err(ErrorResponse::forbidden());
    }

    Ok(store
        .find_users(&group.admins)
        .await?
        .into_iter()
        .map(GroupUserModel::from_user)
        .collect())
}

/// Admins see every poll, members only the ones open at `now`.
pub async fn get_group_polls(
    store: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId,
    now: DateTime<Utc>
) -> Result<Vec<PollSummaryModel>, ErrorResponse> {
    let group = load_group(store, id).await?;

    if !group.is_user(caller) {
        return Err(ErrorResponse::forbidden());
    }

    let is_admin = group.is_admin(caller);

    Ok(store
        .find_polls(&group.polls)
        .await?
        .into_iter()
        .filter(|poll| is_admin || poll.is_open_at(now))
        .map(PollSummaryModel::from_poll)
        .collect())
}

pub async fn join_group(
    store: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId
) -> Result<(), ErrorResponse> {
    let group = load_group(store, id).await?;

    if group.is_user(caller) {
        return Err(ErrorResponse::forbidden());
    }

    store.add_group_member(&group.id, caller).await?;

    Ok(())
}

pub async fn leave_group(
    store: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId
) -> Result<(), ErrorResponse> {
    let group = load_group(store, id).await?;

    if !group.is_member(caller) {
        return Err(ErrorResponse::forbidden());
    }

    store.remove_group_member(&group.id, caller).await?;

    Ok(())
}

pub async fn delete_group(
    store: &dyn Store,
    id: &ObjectId,
    caller: &ObjectId
) -> Result<(), ErrorResponse> {
    let group = load_group(store, id).await?;

    if !group.is_admin(caller) {
        return Err(ErrorResponse::forbidden());
    }

    store.delete_group(&group.id).await?;

    Ok(())
}
