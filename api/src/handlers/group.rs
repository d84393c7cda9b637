use actix_web::{Responder, get, post, web};
use pollbuddy_core::db::Store;

use crate::{
    error::ErrorResponse,
    models::{
        Caller,
        CreateGroupModel,
        EditGroupModel,
        parse_object_id,
        success
    },
    services::group as service
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/groups")
            .service(create_group)
            .service(get_group)
            .service(edit_group)
            .service(get_group_members)
            .service(get_group_admins)
            .service(get_group_polls)
            .service(join_group)
            .service(leave_group)
            .service(delete_group)
    );
}

#[post("/new")]
async fn create_group(
    store: web::Data<dyn Store>,
    caller: Caller,
    body: web::Json<CreateGroupModel>
) -> Result<impl Responder, ErrorResponse> {
    body.validate()?;

    Ok(success(
        service::create_group(store.get_ref(), caller.id(), body.into_inner())
            .await?
    ))
}

#[get("/{id}")]
async fn get_group(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Option<Caller>
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    Ok(success(
        service::get_group(
            store.get_ref(),
            &id,
            caller.as_ref().map(Caller::id)
        )
        .await?
    ))
}

#[post("/{id}/edit")]
async fn edit_group(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Caller,
    body: web::Json<EditGroupModel>
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    body.validate()?;

    service::edit_group(store.get_ref(), &id, caller.id(), body.into_inner())
        .await?;

    Ok(success(()))
}

#[get("/{id}/members")]
async fn get_group_members(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Caller
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    Ok(success(
        service::get_group_members(store.get_ref(), &id, caller.id()).await?
    ))
}

#[get("/{id}/admins")]
async fn get_group_admins(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Caller
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    Ok(success(
        service::get_group_admins(store.get_ref(), &id, caller.id()).await?
    ))
}

#[get("/{id}/polls")]
async fn get_group_polls(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Caller
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    Ok(success(
        service::get_group_polls(
            store.get_ref(),
            &id,
            caller.id(),
            chrono::Utc::now()
        )
        .await?
    ))
}

#[post("/{id}/join")]
async fn join_group(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Caller
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    service::join_group(store.get_ref(), &id, caller.id()).await?;

    Ok(success(()))
}

#[post("/{id}/leave")]
async fn leave_group(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Caller
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    service::leave_group(store.get_ref(), &id, caller.id()).await?;

    Ok(success(()))
}

#[post("/{id}/delete")]
async fn delete_group(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    caller: Caller
) -> Result<impl Responder, ErrorResponse> {
    let id = parse_object_id(&path)?;

    service::delete_group(store.get_ref(), &id, caller.id()).await?;

    Ok(success(()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use pollbuddy_core::db::{Group, MemoryStore, ObjectId, Store, User};
    use serde_json::{Value, json};

    use crate::handlers::json_config;

    fn seed() -> (Arc<MemoryStore>, Group, ObjectId, ObjectId) {
        let store = Arc::new(MemoryStore::new());
        let (admin, member) = (ObjectId::new(), ObjectId::new());

        for (id, name) in [(admin, "u1"), (member, "u2")] {
            store.put_user(User {
                id,
                user_name: name.to_string()
            });
        }

        let mut group = Group::new("Group".into(), "Description".into(), admin);
        group.members.push(member);
        store.put_group(group.clone());

        (store, group, admin, member)
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from($store.clone() as Arc<dyn Store>))
                    .app_data(json_config())
                    .configure(super::config)
            )
            .await
        };
    }

    fn bearer(id: &ObjectId) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", id.to_hex()))
    }

    #[actix_web::test]
    async fn edit_is_gated_on_admin() {
        let (store, group, admin, member) = seed();
        let app = app!(store);

        let request = test::TestRequest::post()
            .uri(&format!("/groups/{}/edit", group.id.to_hex()))
            .insert_header(bearer(&member))
            .set_json(json!({"name": "XXX", "description": "YYY"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["result"], "fail");

        let request = test::TestRequest::post()
            .uri(&format!("/groups/{}/edit", group.id.to_hex()))
            .insert_header(bearer(&admin))
            .set_json(json!({"name": "XXX", "description": "YYY"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({"result": "success", "data": null}));

        assert_eq!(store.group(&group.id).unwrap().name, "XXX");
    }

    #[actix_web::test]
    async fn out_of_range_fields_are_rejected_before_any_change() {
        let (store, group, admin, _) = seed();
        let app = app!(store);

        let request = test::TestRequest::post()
            .uri(&format!("/groups/{}/edit", group.id.to_hex()))
            .insert_header(bearer(&admin))
            .set_json(json!({"name": "X", "description": "Y"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.group(&group.id).unwrap().name, "Group");

        let request = test::TestRequest::post()
            .uri("/groups/new")
            .insert_header(bearer(&admin))
            .set_json(json!({"name": "G", "description": "Description"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["result"], "fail");
    }

    #[actix_web::test]
    async fn create_then_read_as_creator() {
        let (store, _, admin, _) = seed();
        let app = app!(store);

        let request = test::TestRequest::post()
            .uri("/groups/new")
            .insert_header(bearer(&admin))
            .set_json(json!({"name": "Study group", "description": "Weekly"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["result"], "success");

        let id = body["data"]["id"].as_str().unwrap().to_string();

        let request = test::TestRequest::get()
            .uri(&format!("/groups/{id}"))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["data"], json!({
            "name": "Study group",
            "description": "Weekly",
            "isMember": false,
            "isAdmin": true
        }));
    }

    #[actix_web::test]
    async fn read_allows_anonymous_callers() {
        let (store, group, _, _) = seed();
        let app = app!(store);

        let request = test::TestRequest::get()
            .uri(&format!("/groups/{}", group.id.to_hex()))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["data"]["isAdmin"], false);
        assert_eq!(body["data"]["isMember"], false);
    }

    #[actix_web::test]
    async fn members_listing_returns_user_names() {
        let (store, group, admin, member) = seed();
        let app = app!(store);

        let request = test::TestRequest::get()
            .uri(&format!("/groups/{}/members", group.id.to_hex()))
            .insert_header(bearer(&admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            body["data"],
            json!([{"id": member.to_hex(), "userName": "u2"}])
        );
    }

    #[actix_web::test]
    async fn caller_is_required_and_validated() {
        let (store, group, _, _) = seed();
        let app = app!(store);
        let uri = format!("/groups/{}/join", group.id.to_hex());

        let request = test::TestRequest::post().uri(&uri).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = test::TestRequest::post()
            .uri(&uri)
            .insert_header(("Authorization", "Bearer nope"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&ObjectId::new()))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn invalid_ids_and_bodies_are_bad_requests() {
        let (store, _, admin, _) = seed();
        let app = app!(store);

        let request = test::TestRequest::get()
            .uri("/groups/not-an-id")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = test::TestRequest::post()
            .uri("/groups/new")
            .insert_header(bearer(&admin))
            .set_json(json!({"name": "Only a name"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["result"], "fail");
    }

    #[actix_web::test]
    async fn join_leave_and_delete_round() {
        let (store, group, admin, _) = seed();
        let app = app!(store);

        let newcomer = ObjectId::new();
        store.put_user(User {
            id:        newcomer,
            user_name: "u3".to_string()
        });

        let call = |action: &str, caller: &ObjectId| {
            test::TestRequest::post()
                .uri(&format!("/groups/{}/{action}", group.id.to_hex()))
                .insert_header(bearer(caller))
                .to_request()
        };

        let response = test::call_service(&app, call("leave", &newcomer)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = test::call_service(&app, call("join", &newcomer)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = test::call_service(&app, call("join", &newcomer)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = test::call_service(&app, call("leave", &newcomer)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = test::call_service(&app, call("delete", &newcomer)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = test::call_service(&app, call("delete", &admin)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = test::call_service(&app, call("delete", &admin)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
