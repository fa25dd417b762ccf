//! 外部模型能力接口
//!
//! 生成式管线只依赖这些 trait，具体实现（rig provider、LanguageTool）
//! 在每次运行时构造并注入，测试中可以替换为桩实现。

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LLMConfig;

/// 单次生成调用的参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// 最大生成长度（tokens）
    pub max_length: u32,
    pub temperature: f64,
    pub seed: Option<u64>,
}

impl From<&LLMConfig> for GenerationParams {
    fn from(config: &LLMConfig) -> Self {
        Self {
            max_length: config.max_length,
            temperature: config.temperature,
            seed: config.seed,
        }
    }
}

/// 文本生成
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

/// 语法检查发现的问题，offset/length 以字符计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub offset: usize,
    pub length: usize,
    pub message: String,
    /// 建议的替换文本，按优先级排列
    pub replacements: Vec<String>,
    pub rule_id: Option<String>,
}

/// 语法检查与纠正
#[async_trait]
pub trait GrammarCorrector: Send + Sync {
    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>>;

    /// 根据检查结果纠正文本
    fn correct(&self, text: &str, issues: &[GrammarIssue]) -> String {
        apply_corrections(text, issues)
    }
}

/// 文本向量化
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f64>>;
}

/// 不做任何检查的纠正器，用于关闭语法检查时
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughCorrector;

#[async_trait]
impl GrammarCorrector for PassthroughCorrector {
    async fn check(&self, _text: &str) -> Result<Vec<GrammarIssue>> {
        Ok(Vec::new())
    }
}

/// 用每个问题的首选替换覆盖对应区间
///
/// 从后往前替换，使前面的偏移量保持有效；与已替换区间重叠、越界或没有替换建议的问题被跳过。
pub fn apply_corrections(text: &str, issues: &[GrammarIssue]) -> String {
    let mut chars: Vec<char> = text.chars().collect();

    let mut ordered: Vec<&GrammarIssue> = issues
        .iter()
        .filter(|issue| !issue.replacements.is_empty())
        .collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    let mut boundary = chars.len();
    for issue in ordered {
        let end = issue.offset.saturating_add(issue.length);
        if end > boundary {
            continue;
        }
        chars.splice(issue.offset..end, issue.replacements[0].chars());
        boundary = issue.offset;
    }

    chars.into_iter().collect()
}
