use std::{collections::HashMap, str::FromStr};

use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next
};
use http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::{
    Context,
    global,
    trace::{FutureExt, SpanKind, TraceContextExt, Tracer}
};
use opentelemetry_http::HeaderExtractor;

lazy_static::lazy_static! {
    static ref ROUTE_MAP: HashMap<String, String> = {
        HashMap::from([
            ("/api/groups/new", "/api/groups/new"),
            ("/api/groups/{id}", "/api/groups/:id"),
            ("/api/groups/{id}/edit", "/api/groups/:id/edit"),
            ("/api/groups/{id}/members", "/api/groups/:id/members"),
            ("/api/groups/{id}/admins", "/api/groups/:id/admins"),
            ("/api/groups/{id}/polls", "/api/groups/:id/polls"),
            ("/api/groups/{id}/join", "/api/groups/:id/join"),
            ("/api/groups/{id}/leave", "/api/groups/:id/leave"),
            ("/api/groups/{id}/delete", "/api/groups/:id/delete"),
            ("/api/polls/{id}", "/api/polls/:id"),
            ("/api/polls/{id}/questions/{question_id}",
                "/api/polls/:id/questions/:id")
        ].map(|(k, v)| (k.to_string(), v.to_string())))
    };
}

fn parent_context(request: &ServiceRequest) -> Context {
    global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor(&HeaderMap::from_iter(
            request.headers().iter().filter_map(|(k, v)| {
                Some((
                    HeaderName::from_str(k.as_str()).ok()?,
                    HeaderValue::from_bytes(v.as_bytes()).ok()?
                ))
            })
        )))
    })
}

pub async fn otel_middleware(
    request: ServiceRequest,
    next: Next<impl MessageBody>
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let Some(route) = request
        .match_pattern()
        .and_then(|route| ROUTE_MAP.get(&route))
    else {
        return next.call(request).await;
    };

    let tracer = global::tracer("");

    let span = tracer
        .span_builder(format!("{} {}", request.method(), route))
        .with_kind(SpanKind::Server)
        .with_attributes(vec![
            opentelemetry::KeyValue::new(
                "http.method",
                request.method().to_string()
            ),
            opentelemetry::KeyValue::new(
                "http.path",
                request.uri().path().to_string()
            ),
            opentelemetry::KeyValue::new(
                "http.query",
                request.uri().query().unwrap_or_default().to_string()
            ),
        ])
        .start_with_context(&tracer, &parent_context(&request));

    // ? handlers record store failures on whatever span is active
    let cx = Context::current_with_span(span);

    let response = next.call(request).with_context(cx.clone()).await;

    let span = cx.span();

    span.set_attribute(opentelemetry::KeyValue::new(
        "http.status_code",
        match response {
            Ok(ref res) => res.status().as_u16().to_string(),
            Err(_) => "500".to_string()
        }
    ));

    span.end();

    response
}
