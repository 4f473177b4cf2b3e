use std::sync::Arc;

use agrolead_content::{CachedContentSource, ContentSource};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod helpers;

fn quote_body() -> serde_json::Value {
    json!({
        "firstName": "Awa",
        "lastName": "Koné",
        "email": "awa.kone@chocolaterie.example",
        "company": "Chocolaterie du Plateau",
        "country": "FR",
        "product": "liquor",
        "quantity": "5 MT/month",
        "incoterm": "FOB",
        "recaptchaToken": "browser-token",
    })
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let response = helpers::app(&transport, None)
        .oneshot(helpers::get("/health")?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn fields_follow_subject_and_locale() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let response = helpers::app(&transport, None)
        .oneshot(helpers::get("/en/leads/logistics/fields")?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = helpers::json_body(response).await?;
    assert_eq!(body["formType"], "transit");
    assert_eq!(body["locale"], "en");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .map(|f| f.iter().filter_map(|v| v["field"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(fields.first(), Some(&"firstName"));
    assert!(fields.contains(&"origin"));
    assert_eq!(fields.last(), Some(&"message"));

    Ok(())
}

#[tokio::test]
async fn unknown_subject_opens_quote_with_preselected_product() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let response = helpers::app(&transport, None)
        .oneshot(helpers::get("/de/leads/whatever/fields?product=nibs")?)
        .await?;

    let body = helpers::json_body(response).await?;
    assert_eq!(body["formType"], "quote");
    assert_eq!(body["locale"], "fr");
    let product = body["fields"]
        .as_array()
        .and_then(|f| f.iter().find(|v| v["field"] == "product"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(product["binding"]["value"], "nibs");

    Ok(())
}

#[tokio::test]
async fn product_page_slug_reads_cms() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let app = helpers::app(&transport, Some(json!({ "leadProduct": "butter" })));
    let response = app
        .oneshot(helpers::get("/en/leads/samples/fields?slug=cocoa-butter")?)
        .await?;

    let body = helpers::json_body(response).await?;
    assert_eq!(body["formType"], "sample");
    let product = body["fields"]
        .as_array()
        .and_then(|f| f.iter().find(|v| v["field"] == "product"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(product["binding"]["value"], "butter");

    Ok(())
}

#[tokio::test]
async fn valid_quote_is_forwarded() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let response = helpers::app(&transport, None)
        .oneshot(helpers::post_json("/en/leads/quote", &quote_body())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = helpers::json_body(response).await?;
    assert_eq!(body["status"], "success");
    assert_eq!(body["view"]["affordance"], "send_another");

    assert_eq!(transport.calls(), 1);
    let sent = &transport.sent()[0];
    assert_eq!(sent["formType"], "quote");
    assert_eq!(sent["product"], "liquor");
    assert_eq!(sent["incoterm"], "FOB");
    assert_eq!(sent["recaptchaToken"], "browser-token");
    assert_eq!(sent["locale"], "en");

    Ok(())
}

#[tokio::test]
async fn missing_token_is_sent_as_null() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let mut body = quote_body();
    body["recaptchaToken"] = json!(null);

    let response = helpers::app(&transport, None)
        .oneshot(helpers::post_json("/fr/leads/pricing", &body)?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(transport.sent()[0]["recaptchaToken"].is_null());

    Ok(())
}

#[tokio::test]
async fn invalid_partnership_never_calls_endpoint() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let body = json!({
        "firstName": "Awa",
        "lastName": "Koné",
        "email": "awa.kone@chocolaterie.example",
        "company": "Chocolaterie du Plateau",
        "country": "FR",
        "partnershipType": "distribution",
        "annualVolume": "300 MT",
        "message": "",
    });

    let response = helpers::app(&transport, None)
        .oneshot(helpers::post_json("/en/leads/partner", &body)?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = helpers::json_body(response).await?;
    let errors = body["errors"]
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("errors is not an object"))?;
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["message"]);
    assert_eq!(transport.calls(), 0);

    Ok(())
}

#[tokio::test]
async fn specs_accepts_certification_array() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let body = json!({
        "firstName": "Awa",
        "lastName": "Koné",
        "email": "awa.kone@chocolaterie.example",
        "company": "Chocolaterie du Plateau",
        "country": "CI",
        "product": "butter",
        "application": "cosmetics",
        "certifications": ["organic", "halal"],
        "quantity": "ignored on specs",
    });

    let response = helpers::app(&transport, None)
        .oneshot(helpers::post_json("/en/leads/technical", &body)?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let sent = &transport.sent()[0];
    assert_eq!(sent["formType"], "specs");
    assert_eq!(sent["certifications"], "organic,halal");
    assert!(sent.get("quantity").is_none());

    Ok(())
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::rejecting(500);
    let response = helpers::app(&transport, None)
        .oneshot(helpers::post_json("/en/leads/quote", &quote_body())?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = helpers::json_body(response).await?;
    assert_eq!(body["status"], "error");
    assert_eq!(body["view"]["affordance"], "retry");
    assert_eq!(transport.calls(), 1);

    Ok(())
}

#[tokio::test]
async fn cms_product_wins_over_static_default() -> anyhow::Result<()> {
    let transport = helpers::StubTransport::default();
    let app = helpers::app(&transport, Some(json!({ "leadProduct": "powder" })));
    let response = app
        .oneshot(helpers::get(
            "/en/leads/quote/fields?product=beans&slug=cocoa-powder",
        )?)
        .await?;

    let body = helpers::json_body(response).await?;
    let product = body["fields"]
        .as_array()
        .and_then(|f| f.iter().find(|v| v["field"] == "product"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(product["binding"]["value"], "powder");

    Ok(())
}

async fn fetch_twice(revalidate_secs: u64) -> anyhow::Result<usize> {
    let stub = helpers::StubContent::new(json!({ "leadProduct": "cake" }));
    let cached: Arc<dyn ContentSource> = Arc::new(CachedContentSource::new(stub.clone()));
    let mut config = helpers::config();
    config.content.revalidate_secs = revalidate_secs;
    let transport = helpers::StubTransport::default();
    let app = helpers::app_with(config, &transport, Some(cached));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(helpers::get("/en/leads/quote/fields?slug=cocoa-cake")?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    Ok(stub.calls())
}

#[tokio::test]
async fn configured_revalidate_drives_content_cache() -> anyhow::Result<()> {
    assert_eq!(fetch_twice(60).await?, 1);
    assert_eq!(fetch_twice(0).await?, 2);

    Ok(())
}

#[tokio::test]
async fn unsupported_locale_uses_configured_default() -> anyhow::Result<()> {
    let mut config = helpers::config();
    config.i18n.default_locale = "en".to_string();
    let transport = helpers::StubTransport::default();
    let response = helpers::app_with(config, &transport, None)
        .oneshot(helpers::get("/de/leads/quote/fields")?)
        .await?;

    let body = helpers::json_body(response).await?;
    assert_eq!(body["locale"], "en");

    Ok(())
}
