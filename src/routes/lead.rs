use std::{collections::HashMap, str::FromStr};

use agrolead_content::preselected_product;
use agrolead_shared::resolve;
use agrolead_lead::{
    Field, FieldView, FormController, LeadFormType, Locale, Product, StatusView,
    SubmissionPipeline, SubmissionResult, present, verifier::ForwardedToken,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ApiError, routes::AppState};

#[derive(Deserialize)]
pub struct FieldsQuery {
    pub product: Option<String>,
    pub slug: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsResponse {
    pub form_type: LeadFormType,
    pub locale: Locale,
    pub fields: Vec<FieldView>,
    pub view: StatusView,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub status: agrolead_lead::SubmissionStatus,
    pub view: StatusView,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInput {
    pub recaptcha_token: Option<String>,
    #[serde(flatten)]
    pub values: HashMap<String, Value>,
}

fn locale(state: &AppState, segment: &str) -> Locale {
    Locale::from_route(segment, state.config.i18n.locale())
}

/// The CMS document of the product page, when it names a lead product, wins
/// over the static `product` query value.
async fn resolve_product(state: &AppState, query: &FieldsQuery) -> Option<Product> {
    let fallback = query.product.as_deref().and_then(|p| p.parse().ok());
    let cms = match (&state.content, query.slug.as_deref()) {
        (Some(content), Some(slug)) => {
            preselected_product(
                content.as_ref(),
                slug,
                state.config.content.revalidate_secs,
            )
            .await
        }
        _ => None,
    };
    resolve(cms.map(Some), fallback)
}

/// Browsers may post chips as an array; everything else is taken as text.
fn text_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(agrolead_lead::registry::CERTIFICATION_SEPARATOR),
        ),
        Value::Null => Some(String::new()),
        Value::Bool(_) | Value::Object(_) => None,
    }
}

/// GET /{locale}/leads/{subject}/fields
pub async fn fields(
    State(state): State<AppState>,
    Path((locale_segment, subject)): Path<(String, String)>,
    Query(query): Query<FieldsQuery>,
) -> Json<FieldsResponse> {
    let locale = locale(&state, &locale_segment);
    let product = resolve_product(&state, &query).await;
    let form = FormController::from_subject(&subject, product);

    Json(FieldsResponse {
        form_type: form.form_type(),
        locale,
        fields: form.views(locale),
        view: present(form.status(), locale),
    })
}

/// POST /{locale}/leads/{subject}
pub async fn submit(
    State(state): State<AppState>,
    Path((locale_segment, subject)): Path<(String, String)>,
    Json(input): Json<SubmitInput>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let locale = locale(&state, &locale_segment);
    let mut form = FormController::from_subject(&subject, None);
    let schema = form.current_schema();

    for (key, value) in input.values {
        let Ok(field) = Field::from_str(&key) else {
            continue;
        };
        if !schema.contains(field) {
            continue;
        }
        if let Some(value) = text_value(value) {
            form.set(field, value).map_err(anyhow::Error::from)?;
        }
    }

    let pipeline = SubmissionPipeline::new(
        ForwardedToken::new(input.recaptcha_token),
        state.transport.clone(),
        locale,
    )
    .with_bot_timeout(state.config.submission.bot_timeout())
    .with_send_timeout(state.config.submission.timeout());

    match pipeline.submit(&mut form).await {
        SubmissionResult::Sent(_) => Ok(Json(SubmitResponse {
            status: form.status(),
            view: present(form.status(), locale),
        })),
        SubmissionResult::Invalid(errors) => Err(ApiError::Validation(errors.localize(locale))),
        SubmissionResult::Failed(e) => Err(ApiError::Upstream {
            view: present(form.status(), locale),
            message: e.to_string(),
        }),
        SubmissionResult::Busy => Err(ApiError::Conflict),
    }
}
