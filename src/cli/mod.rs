use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider, PipelineKind};
use crate::logging::LogFormat;
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

/// cyberblog-rs - 每日网络安全博客文章生成器
#[derive(Parser, Debug)]
#[command(name = "cyberblog-rs")]
#[command(
    about = "Generates one cybersecurity blog post per day for a static site, from narrative templates or LLM-written sections, and publishes it with git."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 生成管线 (template, generative)
    #[arg(long)]
    pub pipeline: Option<String>,

    /// 站点仓库根目录
    #[arg(short, long)]
    pub repo_root: Option<PathBuf>,

    /// 文章目录
    #[arg(short = 'o', long)]
    pub posts_dir: Option<PathBuf>,

    /// 指定主题（必须是内置主题之一）
    #[arg(short, long)]
    pub topic: Option<String>,

    /// 模拟运行日期 (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// 随机数种子
    #[arg(long)]
    pub seed: Option<u64>,

    /// 即使今天已有文章也重新生成
    #[arg(long)]
    pub force: bool,

    /// 只写入文件，不执行 git 提交与推送
    #[arg(long)]
    pub no_publish: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 日志格式
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// LLM Provider (openai, deepseek, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 文本生成模型
    #[arg(long)]
    pub model: Option<String>,

    /// 向量化模型
    #[arg(long)]
    pub embedding_model: Option<String>,

    /// 单个段落的最大生成长度
    #[arg(long)]
    pub max_length: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 透传给模型的生成种子
    #[arg(long)]
    pub generation_seed: Option<u64>,

    /// 跳过 LanguageTool 语法纠正
    #[arg(long)]
    pub no_grammar: bool,

    /// 相邻段落余弦相似度下限
    #[arg(long)]
    pub coherence_threshold: Option<f64>,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            // 显式指定的配置文件必须可读
            Some(config_path) => Config::from_file(config_path)?,
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_CONFIG_FILE);
                if default_config_path.exists() {
                    Config::from_file(&default_config_path)?
                } else {
                    Config::default()
                }
            }
        };

        if let Some(pipeline) = &self.pipeline {
            config.pipeline = pipeline.parse::<PipelineKind>().map_err(|e| anyhow!(e))?;
        }
        if let Some(repo_root) = self.repo_root {
            config.repo_root = repo_root;
        }
        if let Some(posts_dir) = self.posts_dir {
            config.posts_dir = posts_dir;
        }
        if let Some(topic) = self.topic {
            config.topic = Some(topic);
        }
        if let Some(date) = self.date {
            config.date = Some(date);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.force {
            config.force = true;
        }
        if self.no_publish {
            config.publish.enabled = false;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => config.llm.provider = provider,
                Err(_) => warn!(
                    provider = %provider_str,
                    default = %config.llm.provider,
                    "未知的provider，使用默认provider"
                ),
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(embedding_model) = self.embedding_model {
            config.llm.embedding_model = embedding_model;
        }
        if let Some(max_length) = self.max_length {
            config.llm.max_length = max_length;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(generation_seed) = self.generation_seed {
            config.llm.seed = Some(generation_seed);
        }

        if self.no_grammar {
            config.grammar.enabled = false;
        }
        if let Some(threshold) = self.coherence_threshold {
            config.coherence.threshold = threshold;
        }
        if !config.coherence.threshold.is_finite() {
            bail!(
                "coherence threshold must be a finite number, got {}",
                config.coherence.threshold
            );
        }

        Ok(config)
    }
}
