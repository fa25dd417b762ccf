//! LLM Provider支持模块

use anyhow::{Result, anyhow};
use rig::{
    agent::Agent,
    client::{CompletionClient, EmbeddingsClient},
    completion::Prompt,
    embeddings::EmbeddingModel,
};

use crate::config::{LLMConfig, LLMProvider};
use crate::llm::capabilities::GenerationParams;

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    Anthropic(rig::providers::anthropic::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ProviderClient {
    /// 根据配置创建相应的provider客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        match config.provider {
            LLMProvider::OpenAI => {
                let client = rig::providers::openai::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::OpenAI(client))
            }
            LLMProvider::DeepSeek => {
                let client = rig::providers::deepseek::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::DeepSeek(client))
            }
            LLMProvider::Anthropic => {
                let client =
                    rig::providers::anthropic::ClientBuilder::new(&config.api_key).build()?;
                Ok(ProviderClient::Anthropic(client))
            }
            LLMProvider::Ollama => {
                let client = rig::providers::ollama::Client::builder().build();
                Ok(ProviderClient::Ollama(client))
            }
        }
    }

    /// 创建Agent
    ///
    /// seed 只透传给支持 `seed` 请求参数的 OpenAI 兼容接口。
    pub fn create_agent(
        &self,
        model: &str,
        system_prompt: &str,
        params: &GenerationParams,
    ) -> ProviderAgent {
        let seed_params = params.seed.map(|seed| serde_json::json!({ "seed": seed }));

        match self {
            ProviderClient::OpenAI(client) => {
                let builder = client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(system_prompt)
                    .max_tokens(params.max_length.into())
                    .temperature(params.temperature);
                let agent = match seed_params {
                    Some(extra) => builder.additional_params(extra).build(),
                    None => builder.build(),
                };
                ProviderAgent::OpenAI(agent)
            }
            ProviderClient::DeepSeek(client) => {
                let builder = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(params.max_length.into())
                    .temperature(params.temperature);
                let agent = match seed_params {
                    Some(extra) => builder.additional_params(extra).build(),
                    None => builder.build(),
                };
                ProviderAgent::DeepSeek(agent)
            }
            ProviderClient::Anthropic(client) => {
                let agent = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(params.max_length.into())
                    .temperature(params.temperature)
                    .build();
                ProviderAgent::Anthropic(agent)
            }
            ProviderClient::Ollama(client) => {
                let agent = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(params.max_length.into())
                    .temperature(params.temperature)
                    .build();
                ProviderAgent::Ollama(agent)
            }
        }
    }

    /// 计算文本向量
    pub async fn embed(&self, model: &str, text: &str) -> Result<Vec<f64>> {
        match self {
            ProviderClient::OpenAI(client) => {
                let embedding = client.embedding_model(model).embed_text(text).await?;
                Ok(embedding.vec)
            }
            ProviderClient::Ollama(client) => {
                let embedding = client.embedding_model(model).embed_text(text).await?;
                Ok(embedding.vec)
            }
            ProviderClient::DeepSeek(_) => Err(anyhow!(
                "provider {} does not offer an embeddings API",
                LLMProvider::DeepSeek
            )),
            ProviderClient::Anthropic(_) => Err(anyhow!(
                "provider {} does not offer an embeddings API",
                LLMProvider::Anthropic
            )),
        }
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ProviderAgent {
    /// 执行prompt
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
        }
    }
}
