mod caller;
mod group;
mod poll;

use actix_web::HttpResponse;
use pollbuddy_core::db::ObjectId;
use serde::Serialize;

pub use caller::Caller;
pub use group::{
    CreateGroupModel,
    CreatedModel,
    EditGroupModel,
    GroupModel,
    GroupUserModel
};
pub use poll::{PollModel, PollSummaryModel};

use crate::error::ErrorResponse;

#[derive(Serialize)]
struct SuccessModel<T: Serialize> {
    result: &'static str,
    data:   T
}

/// 200 with the success envelope; `()` is sent as `"data": null`.
pub fn success<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(SuccessModel {
        result: "success",
        data
    })
}

pub fn parse_object_id(raw: &str) -> Result<ObjectId, ErrorResponse> {
    ObjectId::parse_str(raw)
        .map_err(|_| ErrorResponse::bad_request(format!("Invalid id: {raw}")))
}
