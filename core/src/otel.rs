use std::{sync::OnceLock, time::Duration};

use crate::env::env;
use opentelemetry::{
    global,
    KeyValue
};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    metrics::SdkMeterProvider,
    propagation::TraceContextPropagator
};

static METER_PROVIDER: OnceLock<SdkMeterProvider> = OnceLock::new();

pub fn init_otel(
    name: &str,
    version: &str
) -> Result<(), Box<dyn std::error::Error>> {
    if METER_PROVIDER.get().is_some() {
        return Err("otel is already initialized".into());
    }

    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new(vec![
        KeyValue::new("service.name", name.to_string()),
        KeyValue::new("service.version", version.to_string()),
        KeyValue::new("deployment.environment.name",
            if env().dev { "dev" } else { "prod" })
    ]);

    global::set_tracer_provider(
        opentelemetry_sdk::trace::TracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(
        opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_protocol(opentelemetry_otlp::Protocol::HttpBinary)
            .build()?,
        opentelemetry_sdk::runtime::Tokio)
        .build()
    );

    let meter_provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(opentelemetry_sdk::metrics::PeriodicReader::builder(
            opentelemetry_otlp::MetricExporter::builder()
            .with_http()
            .with_protocol(opentelemetry_otlp::Protocol::HttpBinary)
            .with_temporality(opentelemetry_sdk::metrics::Temporality::Delta)
            .build()?,
            opentelemetry_sdk::runtime::Tokio)
        .with_interval(Duration::from_secs(60))
        .build())
        .build();

    METER_PROVIDER
        .set(meter_provider.clone())
        .map_err(|_| "otel is already initialized")?;

    global::set_meter_provider(meter_provider);

    Ok(())
}

pub fn shutdown_otel() -> Result<(), Box<dyn std::error::Error>> {
    global::shutdown_tracer_provider();

    if let Some(meter_provider) = METER_PROVIDER.get() {
        meter_provider.shutdown()?;
    }

    Ok(())
}
