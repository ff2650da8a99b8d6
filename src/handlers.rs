use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::format;
use crate::lookup_client::CpfLookupClient;
use crate::models::{ConsultaForm, ConsultaParams, LookupResult};
use crate::views;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::json;
use std::sync::Arc;

/// Fixed message shown when the birth-year rule blocks a consultation.
pub const SEM_VALORES_MSG: &str = "Não existem valores disponíveis para este CPF.";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the external CPF lookup API.
    pub lookup: CpfLookupClient,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-consulta-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /api/consulta-cpf
///
/// Passthrough proxy for the external lookup API, shielding the browser
/// from cross-origin calls. The upstream JSON body is relayed unmodified
/// on success; upstream failures keep their original HTTP status.
pub async fn consulta_cpf(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConsultaParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cpf = params
        .cpf
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("CPF não fornecido".to_string()))?;

    tracing::info!("GET /api/consulta-cpf - cpf: {}", cpf);

    let data = state
        .lookup
        .consultar(cpf)
        .await
        .context("consulta de CPF")?;

    Ok(Json(data))
}

/// POST /consultar
///
/// Landing-form submission. Strips the input mask, performs the lookup,
/// surfaces any error on the landing page, applies the birth-year rule,
/// and on success redirects to the result view with the full payload
/// URL-encoded in the `dados` parameter.
pub async fn consultar_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ConsultaForm>,
) -> Response {
    let cpf_limpo = format::strip_non_digits(&form.cpf);

    if cpf_limpo.is_empty() {
        return views::landing_page(Some("CPF não fornecido"), &form.cpf).into_response();
    }

    tracing::info!("POST /consultar - cpf: {}", cpf_limpo);

    let data = match state.lookup.consultar(&cpf_limpo).await {
        Ok(data) => data,
        Err(err) => {
            tracing::error!("Consultation failed: {}", err);
            return views::landing_page(Some(&surface_error(&err)), &form.cpf)
                .into_response();
        }
    };

    // An `error` field inside a 2xx body still aborts the flow
    if let Some(msg) = body_error(&data) {
        tracing::warn!("Lookup body carried an error field: {}", msg);
        return views::landing_page(Some(&msg), &form.cpf).into_response();
    }

    // Birth-year rule: years strictly after 1970 have no recoverable value
    let parsed: LookupResult = serde_json::from_value(data.clone()).unwrap_or_default();
    if let Some(nascimento) = parsed
        .identificacao()
        .and_then(|i| i.data_nascimento.as_deref())
    {
        if format::nascimento_acima_de_1970(nascimento) {
            tracing::info!("Birth-year rule blocked CPF {}", cpf_limpo);
            return views::landing_page(Some(SEM_VALORES_MSG), &form.cpf).into_response();
        }
    }

    let dados = match serde_json::to_string(&data) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize lookup payload: {}", e);
            return views::landing_page(Some("Erro ao processar a consulta"), &form.cpf)
                .into_response();
        }
    };

    let encoded: String = url::form_urlencoded::byte_serialize(dados.as_bytes()).collect();
    Redirect::to(&format!("/resultado?dados={}", encoded)).into_response()
}

/// Message shown on the landing page for a failed lookup, preferring the
/// raw upstream body over the generic envelope text.
fn surface_error(err: &AppError) -> String {
    match err {
        AppError::Upstream { details, .. } if !details.trim().is_empty() => details.clone(),
        AppError::Upstream { .. } => "Erro ao consultar CPF na API externa".to_string(),
        AppError::BadRequest(msg) => msg.clone(),
        AppError::Parse(msg) | AppError::Internal(msg) => msg.clone(),
        AppError::WithContext { source, .. } => surface_error(source),
    }
}

/// Extracts a truthy `error` field from an otherwise successful body.
fn body_error(data: &serde_json::Value) -> Option<String> {
    let err = data.get("error")?;
    if err.is_null() {
        return None;
    }
    match err.as_str() {
        Some("") => None,
        Some(s) => Some(s.to_string()),
        None => Some(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_error_detects_truthy_field() {
        assert_eq!(
            body_error(&json!({ "error": "CPF inválido" })),
            Some("CPF inválido".to_string())
        );
        assert_eq!(body_error(&json!({ "error": null })), None);
        assert_eq!(body_error(&json!({ "error": "" })), None);
        assert_eq!(body_error(&json!({ "pessoa": {} })), None);
    }

    #[test]
    fn surface_error_prefers_upstream_details() {
        let err = AppError::Upstream {
            status: 404,
            details: "{\"msg\":\"not found\"}".to_string(),
        };
        assert_eq!(surface_error(&err), "{\"msg\":\"not found\"}");

        let empty = AppError::Upstream {
            status: 502,
            details: "  ".to_string(),
        };
        assert_eq!(surface_error(&empty), "Erro ao consultar CPF na API externa");
    }
}
