//! OTLP/JSON document model for exported spans.
//!
//! Mirrors the subset of the OpenTelemetry protocol's JSON encoding that the
//! exporter writes: one `ExportTraceRequest` per batch, serialized as a single
//! line. IDs are lowercase hex, timestamps are nanosecond strings.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One exported batch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTraceRequest {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: OtlpResource,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct OtlpResource {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<OtlpSpan>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpSpan {
    pub trace_id: String,
    pub span_id: String,
    /// Empty for root spans.
    pub parent_span_id: String,
    pub name: String,
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<OtlpEvent>,
    pub links: Vec<OtlpLink>,
    pub status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpEvent {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpLink {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: Vec<Attribute>,
}

/// `code`: 0 unset, 1 ok, 2 error.
#[derive(Debug, Serialize)]
pub struct OtlpStatus {
    pub code: u8,
    pub message: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: AnyValue,
}

/// Attribute value; integers are strings as in OTLP/JSON.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnyValue {
    BoolValue(bool),
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            Value::Array(_) => Self::StringValue(value.to_string()),
        }
    }
}

impl From<&KeyValue> for Attribute {
    fn from(kv: &KeyValue) -> Self {
        Self {
            key: kv.key.to_string(),
            value: AnyValue::from(&kv.value),
        }
    }
}

fn attributes(kvs: &[KeyValue]) -> Vec<Attribute> {
    kvs.iter().map(Attribute::from).collect()
}

/// Nanoseconds since the Unix epoch; pre-epoch times clamp to zero.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
        .to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

impl From<&Status> for OtlpStatus {
    fn from(status: &Status) -> Self {
        match status {
            Status::Unset => Self { code: 0, message: String::new() },
            Status::Ok => Self { code: 1, message: String::new() },
            Status::Error { description } => Self {
                code: 2,
                message: description.to_string(),
            },
        }
    }
}

impl From<&Event> for OtlpEvent {
    fn from(event: &Event) -> Self {
        Self {
            time_unix_nano: unix_nanos(event.timestamp),
            name: event.name.to_string(),
            attributes: attributes(&event.attributes),
        }
    }
}

impl From<&Link> for OtlpLink {
    fn from(link: &Link) -> Self {
        Self {
            trace_id: format!("{:032x}", link.span_context.trace_id()),
            span_id: format!("{:016x}", link.span_context.span_id()),
            attributes: attributes(&link.attributes),
        }
    }
}

impl From<&SpanData> for OtlpSpan {
    fn from(span: &SpanData) -> Self {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        Self {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            kind: kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: attributes(&span.attributes),
            events: span.events.iter().map(OtlpEvent::from).collect(),
            links: span.links.iter().map(OtlpLink::from).collect(),
            status: OtlpStatus::from(&span.status),
        }
    }
}

impl ExportTraceRequest {
    /// Groups a batch under the given resource and instrumentation scope.
    #[must_use]
    pub fn new(resource: &Resource, scope: &str, batch: &[SpanData]) -> Self {
        let resource_attributes = resource
            .iter()
            .map(|(key, value)| Attribute {
                key: key.to_string(),
                value: AnyValue::from(value),
            })
            .collect();

        Self {
            resource_spans: vec![ResourceSpans {
                resource: OtlpResource {
                    attributes: resource_attributes,
                },
                scope_spans: vec![ScopeSpans {
                    scope: Scope {
                        name: scope.to_string(),
                    },
                    spans: batch.iter().map(OtlpSpan::from).collect(),
                }],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn attribute_values_use_otlp_tags() {
        let attribute = Attribute::from(&KeyValue::new("countries", 42_i64));
        assert_eq!(
            serde_json::to_string(&attribute).unwrap(),
            r#"{"key":"countries","value":{"intValue":"42"}}"#
        );
        assert_eq!(
            serde_json::to_value(AnyValue::from(&Value::Bool(true))).unwrap(),
            serde_json::json!({ "boolValue": true })
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(OtlpStatus::from(&Status::Unset).code, 0);
        assert_eq!(OtlpStatus::from(&Status::Ok).code, 1);
        let error = OtlpStatus::from(&Status::error("decode failed"));
        assert_eq!((error.code, error.message.as_str()), (2, "decode failed"));
    }

    #[test]
    fn timestamps_are_nanosecond_strings() {
        assert_eq!(unix_nanos(UNIX_EPOCH + Duration::from_millis(1500)), "1500000000");
        assert_eq!(unix_nanos(UNIX_EPOCH - Duration::from_secs(1)), "0");
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "covidash")]);
        let request = ExportTraceRequest::new(&resource, "covidash", &[]);
        let json = serde_json::to_value(&request).unwrap();

        let resource_spans = &json["resourceSpans"][0];
        let service = resource_spans["resource"]["attributes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|attribute| attribute["key"] == "service.name")
            .unwrap();
        assert_eq!(service["value"]["stringValue"], "covidash");
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "covidash");
        assert!(resource_spans["scopeSpans"][0]["spans"].as_array().unwrap().is_empty());
    }
}
