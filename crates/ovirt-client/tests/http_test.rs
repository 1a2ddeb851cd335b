//! HTTP tests for the oVirt client using wiremock
//!
//! These tests verify request shape (paths, headers, bodies) and the mapping
//! of engine responses onto `OvirtError` variants.

use ovirt_client::{NicRequest, OvirtClient, OvirtClientTrait, OvirtError};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/ovirt-engine/api";

fn client_for(server: &MockServer) -> OvirtClient {
    OvirtClient::new(
        format!("{}{}/", server.uri(), API),
        "admin@internal".to_string(),
        "secret".to_string(),
    )
    .expect("client should build")
}

#[tokio::test]
async fn test_validate_connection_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/", API)))
        .and(basic_auth("admin@internal", "secret"))
        .and(header("Version", "4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"product_info": {"name": "oVirt Engine"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .validate_connection()
        .await
        .expect("validation should succeed");
}

#[tokio::test]
async fn test_validate_connection_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/", API)))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).validate_connection().await.unwrap_err();
    assert!(matches!(err, OvirtError::Authentication(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_add_nic_posts_profile_reference() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/vms/v1/nics", API)))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "nic1", "vnic_profile": {"id": "p1"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "href": "/ovirt-engine/api/vms/v1/nics/n1",
            "id": "n1",
            "name": "nic1",
            "plugged": "true",
            "vnic_profile": {"href": "/ovirt-engine/api/vnicprofiles/p1", "id": "p1"},
            "vm": {"href": "/ovirt-engine/api/vms/v1", "id": "v1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let nic = client_for(&server)
        .add_nic("v1", &NicRequest::new("nic1", "p1"))
        .await
        .expect("add should succeed")
        .expect("response should carry the nic");

    assert_eq!(nic.id.as_deref(), Some("n1"));
    assert_eq!(nic.plugged, Some(true));
}

#[tokio::test]
async fn test_add_nic_empty_body_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/vms/v1/nics", API)))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let nic = client_for(&server)
        .add_nic("v1", &NicRequest::new("nic1", "p1"))
        .await
        .expect("add should succeed");
    assert!(nic.is_none());
}

#[tokio::test]
async fn test_add_nic_fault_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/vms/v1/nics", API)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "reason": "Operation Failed",
            "detail": "[Cannot add Interface. The vNIC profile does not exist.]"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .add_nic("v1", &NicRequest::new("nic1", "missing"))
        .await
        .unwrap_err();

    match err {
        OvirtError::Api(msg) => {
            assert!(msg.contains("Operation Failed"), "message: {}", msg);
            assert!(msg.contains("vNIC profile does not exist"), "message: {}", msg);
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_nic_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/vms/v1/nics/n1", API)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "reason": "Operation Failed",
            "detail": "Entity not found: n1"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_nic("v1", "n1").await.unwrap_err();
    assert!(err.is_not_found(), "got {:?}", err);
}

#[tokio::test]
async fn test_deactivate_posts_action() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/vms/v1/nics/n1/deactivate", API)))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "complete"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .deactivate_nic("v1", "n1")
        .await
        .expect("deactivate should succeed");
}

#[tokio::test]
async fn test_deactivate_failed_action_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/vms/v1/nics/n1/deactivate", API)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "fault": {"reason": "Operation Failed", "detail": "VM is locked"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .deactivate_nic("v1", "n1")
        .await
        .unwrap_err();
    assert!(
        matches!(err, OvirtError::Api(ref msg) if msg.contains("VM is locked")),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_remove_nic_success_and_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/vms/v1/nics/n1", API)))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/vms/v1/nics/gone", API)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.remove_nic("v1", "n1").await.expect("remove should succeed");
    assert!(client.remove_nic("v1", "gone").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_empty_ids_rejected_before_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    assert!(matches!(
        client.get_nic("", "n1").await,
        Err(OvirtError::InvalidRequest(_))
    ));
    assert!(matches!(
        client.remove_nic("v1", "").await,
        Err(OvirtError::InvalidRequest(_))
    ));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
