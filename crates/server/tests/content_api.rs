mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use configs::Environment;
use serde_json::json;

use support::{body_json, build_app, build_app_with_mail, get, json_request};

#[tokio::test]
async fn health_and_metrics() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;
    let resp = app.call(get("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");

    app.call(get("/api/data/services")).await;
    let resp = app.call(get("/metrics")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    assert!(String::from_utf8_lossy(&bytes).contains("portal_content_reads_total"));

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn fresh_store_serves_defaults() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;

    let services = body_json(app.call(get("/api/data/services")).await).await;
    let ids: Vec<_> = services.as_array().unwrap().iter().map(|s| s["id"].as_str().unwrap().to_string()).collect();
    assert!(ids.contains(&"btp-readiness-check".to_string()));

    let landing = body_json(app.call(get("/api/data/landing-page")).await).await;
    assert!(landing["hero"]["title"].is_string());

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn write_then_read_round_trip() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;
    let services = json!([{
        "id": "s1",
        "title": "Clean Core Review",
        "price": "on request",
        "technologies": ["CAP"],
        "badge": "new",
        "processSteps": [{"title": "Scan", "description": "ATC run", "icon": "search", "durationDays": 3}]
    }]);
    let workshops = json!([{"id": "w1", "title": "Fiori Day", "maxParticipants": null, "room": {"floor": 2}}]);
    let landing = json!({
        "hero": {"title": "Pathfinder", "subtitle": "BTP", "image": {"src": "/hero.png", "alt": ""}},
        "sections": [{
            "id": "why",
            "title": "Why",
            "variant": "cards",
            "items": ["Speed", {"label": "Trust", "icon": "shield"}]
        }],
        "theme": "dark"
    });

    for (uri, payload) in [
        ("/api/data/services", &services),
        ("/api/data/workshops", &workshops),
        ("/api/data/landing-page", &landing),
    ] {
        let resp = app.call(json_request("PUT", uri, payload)).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        assert_eq!(&body_json(resp).await, payload, "{uri}");
        assert_eq!(&body_json(app.call(get(uri)).await).await, payload, "{uri}");
    }

    let one = body_json(app.call(get("/api/data/services/s1")).await).await;
    assert_eq!(one, services[0]);

    // camelCase alias resolves to the same file
    let alias = body_json(app.call(get("/api/data/bestPractices")).await).await;
    let slug = body_json(app.call(get("/api/data/best-practices")).await).await;
    assert_eq!(alias, slug);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn content_category_route_reads_public_categories() -> anyhow::Result<()> {
    let app = build_app(Environment::Production).await?;

    let resp = app.call(get("/api/content/services")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(!body.as_array().unwrap().is_empty());
    assert_eq!(body, body_json(app.call(get("/api/data/services")).await).await);

    let resp = app.call(get("/api/content/landingPage")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["hero"]["title"].is_string());

    assert_eq!(app.call(get("/api/content/pricing")).await.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn records_is_not_a_usable_id() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;
    let resp = app
        .call(json_request("POST", "/api/data/resources/records", &json!({"id": "records", "title": "Shadowed"})))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .call(json_request("PUT", "/api/data/resources", &json!([{"id": "records", "title": "Shadowed"}])))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn upsert_assigns_id() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;
    let resp = app
        .call(json_request("POST", "/api/data/resources/records", &json!({"id": "", "title": "BTP Checklist"})))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let stored = body_json(resp).await;
    let id = stored["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let resp = app.call(get(&format!("/api/data/resources/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn delete_is_idempotent() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;
    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/api/data/workshops/clean-core-workshop")
            .body(Body::empty())
            .unwrap()
    };

    let first = app.call(delete()).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["removed"], true);
    let second = app.call(delete()).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["removed"], false);

    let resp = app.call(get("/api/data/workshops/clean-core-workshop")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn rejects_unknown_category_and_invalid_payloads() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;

    let resp = app.call(get("/api/data/pricing")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.call(json_request("PUT", "/api/data/services", &json!({"not": "an array"}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let dup = json!([{"id": "a", "title": "A"}, {"id": "a", "title": "B"}]);
    let resp = app.call(json_request("PUT", "/api/data/services", &dup)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .call(json_request("PUT", "/api/data/workshops", &json!([{"id": "w", "title": "W", "maxParticipants": 0}])))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // the rejected writes left the defaults alone
    let services = body_json(app.call(get("/api/data/services")).await).await;
    assert!(services.as_array().unwrap().len() > 1);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn snapshot_excludes_mail_config() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;
    let snap = body_json(app.call(get("/api/content")).await).await;
    let obj = snap.as_object().unwrap();
    assert!(obj.contains_key("services"));
    assert!(obj.contains_key("landing-page"));
    assert!(!obj.contains_key("mail-config"));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn assessment_scores_and_rejects() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;

    let resp = app.call(json_request("POST", "/api/assessment", &json!({"ratings": [3, 3, 2, 2, 3, 2]}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["average"], 2.5);
    assert_eq!(body["label"], "Defined");
    assert_eq!(body["radar"].as_array().unwrap().len(), 6);

    let resp = app.call(json_request("POST", "/api/assessment", &json!({"ratings": [3, 3]}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = app.call(json_request("POST", "/api/assessment", &json!({"ratings": [3, 3, 2, 2, 3, 0]}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn pathfinder_lookup() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;
    let units = body_json(app.call(get("/api/pathfinder")).await).await;
    assert_eq!(units.as_array().unwrap().len(), 6);

    let resp = app.call(get("/api/pathfinder/integrate")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], "integrate");

    assert_eq!(app.call(get("/api/pathfinder/teleport")).await.status(), StatusCode::NOT_FOUND);
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn mail_status_reports_env_seed() -> anyhow::Result<()> {
    let app = build_app(Environment::Development).await?;
    assert_eq!(body_json(app.call(get("/api/mail/status")).await).await, json!({"configured": false}));
    app.cleanup().await;

    let raw = json!({"host": "smtp.example.com", "port": 587, "from": "portal@example.com", "auth": {"user": "u", "pass": "p"}});
    let app = build_app_with_mail(Environment::Development, Some(raw.to_string())).await?;
    let status = body_json(app.call(get("/api/mail/status")).await).await;
    assert_eq!(status["configured"], true);
    // seeded into the store at startup
    assert_eq!(status["source"], "store");

    let stored = body_json(app.call(get("/api/data/mail-config")).await).await;
    assert_eq!(stored["host"], "smtp.example.com");
    app.cleanup().await;
    Ok(())
}
