use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use pneumo_api::config::{ApiConfig, LogFormat};
use pneumo_api::router;
use pneumo_api::state::AppState;

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Option<String>, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw)
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, bytes.to_vec())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let (status, _, bytes) = send_raw(app, method, uri, body.map(|json| json.to_string())).await;
    (status, bytes)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router(AppState::new());
    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn lists_every_pathology() {
    let app = router(AppState::new());
    let (status, body) = send_json(&app, "GET", "/pathologies", None).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["ild", "pleural_effusion", "pneumothorax", "copd"]);
}

#[tokio::test]
async fn pathology_detail_carries_catalog_and_display() {
    let app = router(AppState::new());
    let (status, body) = send_json(&app, "GET", "/pathologies/pneumothorax", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "pneumothorax");
    assert_eq!(body["sections"][0]["id"], "generalSigns");
    assert_eq!(body["sections"][3]["gate"], json!({ "attribute": "sex", "sex": "F" }));
    assert!(!body["display"]["groups"].as_array().unwrap().is_empty());

    let (status, body) = send_json(&app, "GET", "/pathologies/asthma", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "pathology not found: asthma");
}

#[tokio::test]
async fn evaluate_returns_visibility_and_view() {
    let app = router(AppState::new());
    let request = json!({
        "state": { "functionalSigns": { "cough": { "present": true, "type": "Productive" } } },
        "patient": { "sex": "F" }
    });
    let (status, body) = send_json(&app, "POST", "/pathologies/copd/evaluate", Some(request)).await;
    assert_eq!(status, StatusCode::OK);

    let fields = &body["visibility"]["fields"];
    assert_eq!(fields["functionalSigns.cough.type"], true);
    assert_eq!(fields["functionalSigns.cough.sputum"], true);
    assert_eq!(fields["generalSigns.fever.temperature"], false);

    let sections: Vec<&str> = body["view"]["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert!(sections.contains(&"gynecoObstetric"));
}

#[tokio::test]
async fn evaluate_without_patient_hides_gated_sections() {
    let app = router(AppState::new());
    let (status, body) =
        send_json(&app, "POST", "/pathologies/ild/evaluate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let mounted = body["visibility"]["mounted_sections"].as_array().unwrap();
    assert!(!mounted.contains(&json!("gynecoObstetric")));

    let (status, body) = send_json(
        &app,
        "POST",
        "/pathologies/ild/evaluate",
        Some(json!({ "state": [1, 2] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("array"));
}

#[tokio::test]
async fn validate_reports_issues_as_unprocessable() {
    let app = router(AppState::new());
    let (status, body) = send_json(
        &app,
        "POST",
        "/pathologies/pneumothorax/validate",
        Some(json!({ "episode": { "side": "Haut" }, "clinicalExam": { "spo2": "n/a" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let issues = body["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["path"], "episode.side");

    let (status, body) = send_json(
        &app,
        "POST",
        "/pathologies/pneumothorax/validate",
        Some(json!({ "clinicalExam": { "spo2": "n/a" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["clinicalExam"]["spo2"], Value::Null);
    assert_eq!(body["data"]["episode"]["side"], "");
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let app = router(AppState::new());
    let patient = Uuid::new_v4();
    let requests = [
        ("GET", "/patients/not-a-uuid/pathologies/copd".to_string(), None),
        (
            "PUT",
            format!("/patients/{patient}/pathologies/copd"),
            Some("{not json".to_string()),
        ),
        (
            "POST",
            "/pathologies/copd/evaluate".to_string(),
            Some(json!({ "state": {}, "patient": { "sex": "X" } }).to_string()),
        ),
        (
            "GET",
            format!("/patients/{patient}/pathologies/copd/summary?show_unanswered=maybe"),
            None,
        ),
    ];

    for (method, uri, body) in requests {
        let (status, content_type, bytes) = send_raw(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert!(
            content_type.as_deref().is_some_and(|ct| ct.starts_with("application/json")),
            "{method} {uri} answered {content_type:?}"
        );
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(!body["error"].as_str().unwrap().is_empty(), "{method} {uri}");
    }
}

#[tokio::test]
async fn saved_records_round_trip_and_keep_identity() {
    let app = router(AppState::new());
    let patient = Uuid::new_v4();
    let uri = format!("/patients/{patient}/pathologies/pleural_effusion");

    let (status, _) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, first) = send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "thoracentesis": { "performed": true, "proteins": "38" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["thoracentesis"]["proteins"].as_f64(), Some(38.0));

    let (status, second) = send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "thoracentesis": { "performed": true, "proteins": "41" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["created_at"], first["created_at"]);

    let (status, loaded) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, second);

    let (status, _) = send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "thoracentesis": { "performed": "oui" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, still) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(still, second);
}

#[tokio::test]
async fn summary_renders_saved_record() {
    let app = router(AppState::new());
    let patient = Uuid::new_v4();
    let uri = format!("/patients/{patient}/pathologies/copd");

    send_json(
        &app,
        "PUT",
        &uri,
        Some(json!({ "spirometry": { "performed": true, "ratio": 48 }, "scores": { "cat": 18 } })),
    )
    .await;

    let (status, body) = send_json(&app, "GET", &format!("{uri}/summary"), None).await;
    assert_eq!(status, StatusCode::OK);
    let markdown = body["markdown"].as_str().unwrap();
    assert!(markdown.contains("- **VEMS/CVF** : 48 %"));
    assert!(markdown.contains("- **Score CAT** : 18"));
    assert!(!markdown.contains("Non renseigné"));

    let (_, body) = send_json(&app, "GET", &format!("{uri}/summary?show_unanswered=true"), None).await;
    let markdown = body["markdown"].as_str().unwrap();
    assert!(markdown.contains("Non renseigné"));
    assert!(!markdown.contains("Grossesse"));

    let (_, body) =
        send_json(&app, "GET", &format!("{uri}/summary?show_unanswered=true&sex=M"), None).await;
    assert!(!body["markdown"].as_str().unwrap().contains("Grossesse"));

    let (status, body) =
        send_json(&app, "GET", &format!("{uri}/summary?show_unanswered=true&sex=F"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["markdown"].as_str().unwrap().contains("- **Grossesse** : Non renseigné"));

    let (status, bytes) = send(&app, "GET", &format!("{uri}/summary/docx"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"PK"));

    let other = Uuid::new_v4();
    let (status, _) = send_json(
        &app,
        "GET",
        &format!("/patients/{other}/pathologies/copd/summary"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn config_defaults_and_overrides() {
    let config = ApiConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(config.log_format, LogFormat::Json);
    assert!(!config.lambda);

    let config = ApiConfig::from_lookup(|key| match key {
        "PNEUMO_BIND_ADDR" => Some("0.0.0.0:9000".to_string()),
        "PNEUMO_LOG_FORMAT" => Some("pretty".to_string()),
        "AWS_LAMBDA_RUNTIME_API" => Some("127.0.0.1:9001".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.bind_addr.port(), 9000);
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert!(config.lambda);

    assert!(ApiConfig::from_lookup(|key| (key == "PNEUMO_LOG_FORMAT").then(|| "xml".to_string())).is_err());
    assert!(ApiConfig::from_lookup(|key| (key == "PNEUMO_BIND_ADDR").then(|| "nowhere".to_string())).is_err());
}
