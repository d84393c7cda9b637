use actix_web::{Responder, get, web};
use pollbuddy_core::db::Store;

use crate::{
    error::ErrorResponse,
    models::{Caller, parse_object_id, success},
    services::poll as service
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/polls").service(get_poll).service(get_question));
}

#[get("/{id}")]
async fn get_poll(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Option<Caller>
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    Ok(success(
        service::get_poll(
            store.get_ref(),
            &id,
            caller.as_ref().map(Caller::id),
            chrono::Utc::now()
        )
        .await?
    ))
}

#[get("/{id}/questions/{question_id}")]
async fn get_question(
    store: web::Data<dyn Store>,
    path: web::Path<(String, String)>
) -> Result<impl Responder, ErrorResponse> {
    let (id, question_id) = path.into_inner();

    let (id, question_id) =
        (parse_object_id(&id)?, parse_object_id(&question_id)?);

    Ok(success(
        service::get_question(store.get_ref(), &id, &question_id).await?
    ))
}
