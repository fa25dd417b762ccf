//! LLM客户端 - 基于 rig 的文本生成与向量化服务

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tracing::debug;

use crate::config::LLMConfig;
use crate::llm::capabilities::{Embedder, GenerationParams, TextGenerator};

mod providers;

use providers::ProviderClient;

/// 所有段落共用的系统提示词
pub const SYSTEM_PROMPT: &str = "You are an experienced vCISO writing for a professional cybersecurity blog. \
Write clear, accurate and practical prose for security leaders. \
Do not add Markdown headings, preambles or closing remarks; answer with the requested text only.";

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(config)?;
        Ok(Self {
            config: config.clone(),
            client,
        })
    }
}

#[async_trait]
impl TextGenerator for LLMClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            max_length = params.max_length,
            "calling text generation model"
        );
        let agent = self
            .client
            .create_agent(&self.config.model, SYSTEM_PROMPT, params);
        agent.prompt(prompt).await
    }
}

#[async_trait]
impl Embedder for LLMClient {
    async fn embed(&self, text: &str) -> Result<Vec<f64>> {
        let vector = self
            .client
            .embed(&self.config.embedding_model, text)
            .await?;
        if vector.is_empty() {
            return Err(anyhow!(
                "embedding model {} returned an empty vector",
                self.config.embedding_model
            ));
        }
        Ok(vector)
    }
}
