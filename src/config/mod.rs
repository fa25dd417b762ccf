use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// 默认配置文件名，位于当前工作目录
pub const DEFAULT_CONFIG_FILE: &str = "cyberblog.toml";

/// 读取LLM API KEY的环境变量
pub const API_KEY_ENV: &str = "CYBERBLOG_LLM_API_KEY";

/// 文章生成管线
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineKind {
    /// 固定叙事模板渲染
    #[serde(rename = "template")]
    #[default]
    Template,
    /// 大模型逐段生成 + 语法纠正 + 语义连贯性校验
    #[serde(rename = "generative")]
    Generative,
}

impl std::fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineKind::Template => write!(f, "template"),
            PipelineKind::Generative => write!(f, "generative"),
        }
    }
}

impl std::str::FromStr for PipelineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "template" | "templates" => Ok(PipelineKind::Template),
            "generative" | "llm" | "ai" => Ok(PipelineKind::Generative),
            _ => Err(format!("Unknown pipeline: {}", s)),
        }
    }
}

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 使用的生成管线
    pub pipeline: PipelineKind,

    /// 站点仓库根目录，git命令在此执行
    pub repo_root: PathBuf,

    /// 文章目录，相对路径以 repo_root 为基准
    pub posts_dir: PathBuf,

    /// 指定主题，不指定则随机选择
    pub topic: Option<String>,

    /// 模拟运行日期，不指定则使用当前UTC日期
    pub date: Option<NaiveDate>,

    /// 随机数种子，用于复现主题与模板的选择
    pub seed: Option<u64>,

    /// 忽略“今日已发布”检查
    pub force: bool,

    /// 作者信息
    pub author: AuthorConfig,

    /// 发布配置
    pub publish: PublishConfig,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 语法检查配置
    pub grammar: GrammarConfig,

    /// 语义连贯性校验配置
    pub coherence: CoherenceConfig,
}

/// 作者信息
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    /// 文末 "About the Author" 区块的内容，原样附加
    pub bio: String,
}

/// 发布配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PublishConfig {
    /// 写入文章后是否提交并推送
    pub enabled: bool,

    /// 提交使用的 git user.name
    pub git_user_name: String,

    /// 提交使用的 git user.email
    pub git_user_email: String,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 文本生成模型
    pub model: String,

    /// 向量化模型
    pub embedding_model: String,

    /// 单个段落的最大生成长度（tokens）
    pub max_length: u32,

    /// 温度
    pub temperature: f64,

    /// 生成种子，provider支持时透传
    pub seed: Option<u64>,
}

/// 语法检查配置（LanguageTool HTTP API）
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GrammarConfig {
    pub enabled: bool,
    pub api_base_url: String,
    pub language: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CoherenceConfig {
    /// 相邻段落余弦相似度下限
    pub threshold: f64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 文章目录的实际路径
    pub fn posts_path(&self) -> PathBuf {
        if self.posts_dir.is_absolute() {
            self.posts_dir.clone()
        } else {
            self.repo_root.join(&self.posts_dir)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineKind::default(),
            repo_root: PathBuf::from("."),
            posts_dir: PathBuf::from("_posts"),
            topic: None,
            date: None,
            seed: None,
            force: false,
            author: AuthorConfig::default(),
            publish: PublishConfig::default(),
            llm: LLMConfig::default(),
            grammar: GrammarConfig::default(),
            coherence: CoherenceConfig::default(),
        }
    }
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: String::from("Adam Rivers"),
            bio: String::from(
                "Adam Rivers is the CEO of Hello Security LLC and a seasoned vCISO with over 15 years \n\
                 of experience in cybersecurity. He specializes in helping organizations build robust \n\
                 security programs and navigate complex compliance requirements.",
            ),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            git_user_name: String::from("Blog Generator"),
            git_user_email: String::from("blog@adamrivers.com"),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model: String::from("gpt-4o-mini"),
            embedding_model: String::from("text-embedding-3-small"),
            max_length: 600,
            temperature: 0.7,
            seed: None,
        }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base_url: String::from("https://api.languagetool.org"),
            language: String::from("en-US"),
            timeout_seconds: 30,
        }
    }
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self { threshold: 0.3 }
    }
}
