//! LanguageTool 语法检查客户端
//!
//! 调用 `POST {api_base_url}/v2/check`，把返回的 matches 转为 [`GrammarIssue`]。

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::GrammarConfig;
use crate::llm::capabilities::{GrammarCorrector, GrammarIssue};

#[derive(Clone)]
pub struct LanguageToolClient {
    http: reqwest::Client,
    endpoint: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<CheckMatch>,
}

#[derive(Debug, Deserialize)]
struct CheckMatch {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<Replacement>,
    rule: Option<Rule>,
}

#[derive(Debug, Deserialize)]
struct Replacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct Rule {
    id: String,
}

impl From<CheckMatch> for GrammarIssue {
    fn from(m: CheckMatch) -> Self {
        GrammarIssue {
            offset: m.offset,
            length: m.length,
            message: m.message,
            replacements: m.replacements.into_iter().map(|r| r.value).collect(),
            rule_id: m.rule.map(|r| r.id),
        }
    }
}

impl LanguageToolClient {
    pub fn new(config: &GrammarConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build LanguageTool HTTP client")?;
        Ok(Self {
            http,
            endpoint: format!("{}/v2/check", config.api_base_url.trim_end_matches('/')),
            language: config.language.clone(),
        })
    }

    /// 解析 LanguageTool 的响应体
    fn parse_response(body: &str) -> Result<Vec<GrammarIssue>> {
        let response: CheckResponse =
            serde_json::from_str(body).context("Failed to parse LanguageTool response")?;
        Ok(response.matches.into_iter().map(GrammarIssue::from).collect())
    }
}

#[async_trait]
impl GrammarCorrector for LanguageToolClient {
    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>> {
        let body = self
            .http
            .post(&self.endpoint)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .await
            .context("LanguageTool request failed")?
            .error_for_status()
            .context("LanguageTool returned an error status")?
            .text()
            .await?;

        let issues = Self::parse_response(&body)?;
        debug!(issues = issues.len(), "grammar check finished");
        Ok(issues)
    }
}
