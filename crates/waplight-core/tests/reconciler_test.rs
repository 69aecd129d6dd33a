#![allow(clippy::unwrap_used)]
// Integration tests for the discovery/reconciliation pass and the
// characteristic handlers, using a wiremock controller and a recording
// registry double.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use waplight_core::{
    AccessoryRecord, AccessoryRegistry, LightHandler, PLATFORM_NAME, PLUGIN_NAME, PlatformConfig,
    SessionHolder, WapLightPlatform, accessory_uuid,
};

// ── Test doubles and helpers ────────────────────────────────────────

/// Records every host registration call for later assertions.
#[derive(Default)]
struct RecordingRegistry {
    registered: Vec<AccessoryRecord>,
    unregistered: Vec<AccessoryRecord>,
}

impl AccessoryRegistry for RecordingRegistry {
    fn register(&mut self, plugin: &str, platform: &str, records: &[AccessoryRecord]) {
        assert_eq!(plugin, PLUGIN_NAME);
        assert_eq!(platform, PLATFORM_NAME);
        self.registered.extend_from_slice(records);
    }

    fn unregister(&mut self, plugin: &str, platform: &str, records: &[AccessoryRecord]) {
        assert_eq!(plugin, PLUGIN_NAME);
        assert_eq!(platform, PLATFORM_NAME);
        self.unregistered.extend_from_slice(records);
    }
}

/// Counts ERROR-level events emitted while a test subscriber is active.
struct ErrorCount(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for ErrorCount {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn fake_jwt() -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(br#"{"csrfToken":"csrf-123"}"#);
    format!("{header}.{payload}.signature")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "set-cookie",
                    format!("TOKEN={}; Path=/; HttpOnly", fake_jwt()).as_str(),
                )
                .set_body_json(json!({})),
        )
        .mount(server)
        .await;
}

async fn mount_devices(server: &MockServer, devices: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/proxy/network/api/s/default/stat/device"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "meta": { "rc": "ok" }, "data": devices })),
        )
        .mount(server)
        .await;
}

fn config(server: &MockServer, include: &[&str], exclude: &[&str]) -> PlatformConfig {
    PlatformConfig {
        host: server.uri(),
        username: "admin".into(),
        password: SecretString::from("secret".to_owned()),
        include_ids: include.iter().map(|s| (*s).to_owned()).collect(),
        exclude_ids: exclude.iter().map(|s| (*s).to_owned()).collect(),
    }
}

fn cached_record(id: &str, name: &str) -> AccessoryRecord {
    AccessoryRecord::new(
        serde_json::from_value(json!({ "_id": id, "type": "uap", "name": name }))
            .expect("valid device JSON"),
    )
}

// ── Reconciliation tests ────────────────────────────────────────────

#[tokio::test]
async fn new_included_ap_is_registered_once() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([
            { "_id": "1", "type": "uap", "name": "AP1", "led_override": "on" },
            { "_id": "2", "type": "usw", "name": "Switch" },
        ]),
    )
    .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &[]));
    platform.discover_devices(&mut registry).await.unwrap();

    assert_eq!(registry.registered.len(), 1);
    assert_eq!(registry.registered[0].uuid, accessory_uuid("1"));
    assert_eq!(registry.registered[0].display_name, "AP1");
    assert!(registry.unregistered.is_empty());
    assert_eq!(platform.handlers().len(), 1);
}

#[tokio::test]
async fn restored_accessory_is_not_registered_again() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([{ "_id": "1", "type": "uap", "name": "AP1" }]),
    )
    .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &[]));
    platform.configure_accessory(cached_record("1", "AP1"));
    platform.discover_devices(&mut registry).await.unwrap();

    // Restore, not create: no registration calls at all.
    assert!(registry.registered.is_empty());
    assert!(registry.unregistered.is_empty());
    assert_eq!(platform.handlers().len(), 1);
    assert_eq!(platform.handlers()[0].record().uuid, accessory_uuid("1"));
}

#[tokio::test]
async fn newly_excluded_accessory_is_unregistered() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([{ "_id": "1", "type": "uap", "name": "AP1" }]),
    )
    .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &["1"]));
    platform.configure_accessory(cached_record("1", "AP1"));
    platform.discover_devices(&mut registry).await.unwrap();

    // Exactly one unregister, zero registers, no live handler.
    assert!(registry.registered.is_empty());
    assert_eq!(registry.unregistered.len(), 1);
    assert_eq!(registry.unregistered[0].uuid, accessory_uuid("1"));
    assert!(platform.handlers().is_empty());
}

#[tokio::test]
async fn accessory_dropped_from_include_list_is_unregistered() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([
            { "_id": "1", "type": "uap", "name": "AP1" },
            { "_id": "2", "type": "uap", "name": "AP2" },
        ]),
    )
    .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &["2"], &[]));
    platform.configure_accessory(cached_record("1", "AP1"));
    platform.discover_devices(&mut registry).await.unwrap();

    assert_eq!(registry.unregistered.len(), 1);
    assert_eq!(registry.unregistered[0].uuid, accessory_uuid("1"));
    assert_eq!(registry.registered.len(), 1);
    assert_eq!(registry.registered[0].uuid, accessory_uuid("2"));
    assert_eq!(platform.handlers().len(), 1);
}

#[tokio::test]
async fn new_excluded_ap_is_never_created() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([{ "_id": "1", "type": "uap", "name": "AP1" }]),
    )
    .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &["1"]));
    platform.discover_devices(&mut registry).await.unwrap();

    assert!(registry.registered.is_empty());
    assert!(registry.unregistered.is_empty());
    assert!(platform.handlers().is_empty());
}

#[tokio::test]
async fn cached_accessory_absent_from_controller_is_left_alone() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(&server, json!([])).await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &[]));
    platform.configure_accessory(cached_record("ghost", "Gone AP"));
    platform.discover_devices(&mut registry).await.unwrap();

    assert!(registry.registered.is_empty());
    assert!(registry.unregistered.is_empty());
}

#[tokio::test]
async fn auth_failure_aborts_pass_without_registry_changes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &["1"]));
    platform.configure_accessory(cached_record("1", "AP1"));

    // The pass degrades cleanly: no error bubble, no session published,
    // and no registration changes — not even removals.
    platform.discover_devices(&mut registry).await.unwrap();

    assert!(registry.registered.is_empty());
    assert!(registry.unregistered.is_empty());
    assert!(platform.handlers().is_empty());
    assert!(platform.session().get().is_none());
}

// ── Handler tests ───────────────────────────────────────────────────

#[tokio::test]
async fn handler_without_session_degrades_to_false_with_one_error_each() {
    use tracing_subscriber::layer::SubscriberExt;

    let errors = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCount(Arc::clone(&errors)));
    let _guard = tracing::subscriber::set_default(subscriber);

    let handler = LightHandler::new(
        cached_record("1", "AP1"),
        Arc::new(SessionHolder::new()),
    );

    assert!(!handler.get_on().await);
    assert_eq!(errors.load(Ordering::Relaxed), 1);

    assert!(!handler.set_on(true).await);
    assert_eq!(errors.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn handler_set_degrades_to_false_on_controller_error() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([{ "_id": "1", "type": "uap", "name": "AP1" }]),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path("/proxy/network/api/s/default/rest/device/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &[]));
    platform.discover_devices(&mut registry).await.unwrap();

    assert!(!platform.handlers()[0].set_on(true).await);
}

#[tokio::test]
async fn end_to_end_discovery_and_get() {
    // One AP with LED forced on, one switch. Discovery yields exactly
    // one accessory and its GET reads true.
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([
            { "_id": "1", "type": "uap", "name": "AP1", "led_override": "on" },
            { "_id": "2", "type": "usw", "name": "Switch" },
        ]),
    )
    .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &[]));
    platform.discover_devices(&mut registry).await.unwrap();

    assert_eq!(platform.handlers().len(), 1);
    let handler = &platform.handlers()[0];
    assert_eq!(handler.information().name, "AP1");
    assert!(handler.get_on().await);
}

#[tokio::test]
async fn handler_set_writes_led_override() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([{ "_id": "1", "type": "uap", "name": "AP1" }]),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path("/proxy/network/api/s/default/rest/device/1"))
        .and(body_json(json!({ "led_override": "on" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "meta": { "rc": "ok" }, "data": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &[]));
    platform.discover_devices(&mut registry).await.unwrap();

    assert!(platform.handlers()[0].set_on(true).await);
}

#[tokio::test]
async fn handler_get_for_vanished_device_is_false() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_devices(
        &server,
        json!([{ "_id": "1", "type": "uap", "name": "AP1" }]),
    )
    .await;

    let mut registry = RecordingRegistry::default();
    let mut platform = WapLightPlatform::new(config(&server, &[], &[]));
    platform.discover_devices(&mut registry).await.unwrap();

    // Attach a handler for a device the controller does not report.
    let handler = LightHandler::new(cached_record("ghost", "Gone AP"), platform.session());
    assert!(!handler.get_on().await);
}
