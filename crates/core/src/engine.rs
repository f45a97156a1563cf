use serde_json::{Value, json};

use crate::backend::{Backend, BackendConfig};
use crate::context::build_context;
use crate::error::{Result, SeoError};
use crate::fallback::fallback;
use crate::prompt::{system_prompt, user_prompt};
use crate::repair;
use crate::types::{AnalysisResult, VideoContext};

/// Run the full generation pipeline. Never fails outward: any internal
/// error (unreachable backend, missing key, unparseable response, schema
/// violation) is absorbed into the deterministic fallback result.
pub async fn generate(
    video: &VideoContext,
    language: &str,
    backend: Backend,
    model: &str,
) -> AnalysisResult {
    match try_generate(video, language, backend, model).await {
        Ok(result) => result,
        Err(_) => fallback(video, language),
    }
}

/// As [`generate`] but with an explicit, already-resolved backend config.
pub async fn generate_with_config(
    video: &VideoContext,
    language: &str,
    config: &BackendConfig,
) -> AnalysisResult {
    match try_generate_with_config(video, language, config).await {
        Ok(result) => result,
        Err(_) => fallback(video, language),
    }
}

/// Fallible variant for callers that want to observe degradation before
/// producing the fallback themselves.
pub async fn try_generate(
    video: &VideoContext,
    language: &str,
    backend: Backend,
    model: &str,
) -> Result<AnalysisResult> {
    let config = backend.resolve(model)?;
    try_generate_with_config(video, language, &config).await
}

pub async fn try_generate_with_config(
    video: &VideoContext,
    language: &str,
    config: &BackendConfig,
) -> Result<AnalysisResult> {
    let context_block = build_context(video, config.kind);
    let system = system_prompt(language);
    let user = user_prompt(&context_block);

    // Exactly one attempt; retry with backoff is the caller's job.
    let content = match config.kind {
        Backend::Remote => invoke_openai(config, &system, &user).await?,
        Backend::Local => invoke_ollama(config, &system, &user).await?,
    };

    let mut result: AnalysisResult = serde_json::from_str(repair::extract_json(&content))
        .map_err(|err| SeoError::SchemaViolation {
            reason: err.to_string(),
        })?;
    repair::repair(&mut result);
    Ok(result)
}

async fn invoke_openai(config: &BackendConfig, system: &str, user: &str) -> Result<String> {
    let key = config
        .api_key
        .as_deref()
        .ok_or_else(|| unavailable(config, "missing API key"))?;

    let response = reqwest::Client::new()
        .post(&config.api_url)
        .bearer_auth(key)
        .json(&json!({
            "model": config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": 0.7,
            "response_format": {"type": "json_object"},
        }))
        .send()
        .await
        .map_err(|err| unavailable(config, &err.to_string()))?
        .error_for_status()
        .map_err(|err| unavailable(config, &err.to_string()))?
        .json::<Value>()
        .await
        .map_err(|err| unavailable(config, &err.to_string()))?;

    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| unavailable(config, &format!("invalid API response: {response}")))?;
    Ok(content.to_string())
}

async fn invoke_ollama(config: &BackendConfig, system: &str, user: &str) -> Result<String> {
    let response = reqwest::Client::new()
        .post(&config.api_url)
        .json(&json!({
            "model": config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "stream": false,
            "format": "json",
            "options": {"temperature": 0.7},
        }))
        .send()
        .await
        .map_err(|err| unavailable(config, &err.to_string()))?
        .error_for_status()
        .map_err(|err| unavailable(config, &err.to_string()))?
        .json::<Value>()
        .await
        .map_err(|err| unavailable(config, &err.to_string()))?;

    let content = response["message"]["content"]
        .as_str()
        .ok_or_else(|| unavailable(config, &format!("invalid API response: {response}")))?;
    Ok(content.to_string())
}

fn unavailable(config: &BackendConfig, reason: &str) -> SeoError {
    SeoError::BackendUnavailable {
        backend: config.kind.name().to_string(),
        reason: reason.to_string(),
    }
}
