#![forbid(unsafe_code)]

use std::sync::Arc;

use actix_web::{
    App,
    HttpResponse,
    HttpServer,
    Responder,
    get,
    middleware::from_fn,
    web
};
use pollbuddy_core::{
    db::{MongoStore, Store},
    env,
    init_mongo,
    init_otel,
    shutdown_otel
};

mod error;
mod handlers;
mod middleware;
mod models;
mod services;


#[get("/healthcheck")]
async fn healthcheck() -> impl Responder {
    HttpResponse::NoContent().finish()
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_otel("api", env!("CARGO_PKG_VERSION"))?;

    let store: Arc<dyn Store> = Arc::new(MongoStore::new(init_mongo(true).await?));
    let store = web::Data::from(store);

    println!("listening on {}:{}", env().host, env().port);

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(middleware::otel))
            .app_data(store.clone())
            .app_data(handlers::json_config())
            .service(healthcheck)
            .service(
                web::scope("/api")
                    .configure(handlers::group)
                    .configure(handlers::poll)
            )
    })
    .bind((env().host.as_str(), env().port))?
    .run()
    .await?;

    shutdown_otel()
}
