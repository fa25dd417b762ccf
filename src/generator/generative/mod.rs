//! 生成式管线：逐段调用文本生成模型，经语法纠正与语义连贯性校验后渲染为文章

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AuthorConfig;
use crate::error::BlogError;
use crate::generator::post::{FrontMatter, Post, default_tags};
use crate::generator::template::BlogTemplates;
use crate::llm::capabilities::{Embedder, GenerationParams, GrammarCorrector, TextGenerator};

pub mod coherence;
pub mod prompts;

/// seo_description 的最大长度
const SEO_DESCRIPTION_LIMIT: usize = 160;

/// 文章的段落槽位，顺序即生成顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionSlot {
    Title,
    Introduction,
    Facts,
    Analysis,
    Conclusion,
}

impl SectionSlot {
    pub const ALL: [SectionSlot; 5] = [
        SectionSlot::Title,
        SectionSlot::Introduction,
        SectionSlot::Facts,
        SectionSlot::Analysis,
        SectionSlot::Conclusion,
    ];
}

impl std::fmt::Display for SectionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            SectionSlot::Title => "title",
            SectionSlot::Introduction => "introduction",
            SectionSlot::Facts => "facts",
            SectionSlot::Analysis => "analysis",
            SectionSlot::Conclusion => "conclusion",
        };
        write!(f, "{}", str)
    }
}

/// 一篇文章的全部段落
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sections {
    pub title: String,
    pub introduction: String,
    pub facts: String,
    pub analysis: String,
    pub conclusion: String,
}

impl Sections {
    fn slot_mut(&mut self, slot: SectionSlot) -> &mut String {
        match slot {
            SectionSlot::Title => &mut self.title,
            SectionSlot::Introduction => &mut self.introduction,
            SectionSlot::Facts => &mut self.facts,
            SectionSlot::Analysis => &mut self.analysis,
            SectionSlot::Conclusion => &mut self.conclusion,
        }
    }

    /// 参与连贯性校验的正文段落（不含标题），按文章顺序
    pub fn body(&self) -> [&str; 4] {
        [
            self.introduction.as_str(),
            self.facts.as_str(),
            self.analysis.as_str(),
            self.conclusion.as_str(),
        ]
    }
}

/// 一次运行注入的外部模型
#[derive(Clone, Copy)]
pub struct LanguageModels<'a> {
    pub generator: &'a dyn TextGenerator,
    pub corrector: &'a dyn GrammarCorrector,
    pub embedder: &'a dyn Embedder,
}

/// 生成请求
#[derive(Debug, Clone)]
pub struct ArticleRequest<'a> {
    pub topic: &'a str,
    /// 引言段落参考的行业动态
    pub headline: &'a str,
    pub params: GenerationParams,
    pub coherence_threshold: f64,
}

/// 生成、纠正并校验全部段落
///
/// 连贯性校验失败时返回 [`BlogError::SemanticCoherence`]，不做重试。
pub async fn generate_article(
    request: &ArticleRequest<'_>,
    models: LanguageModels<'_>,
) -> Result<Sections> {
    let mut sections = Sections::default();

    for slot in SectionSlot::ALL {
        let prompt = prompts::section_prompt(slot, request.topic, request.headline);
        let raw = models
            .generator
            .generate(&prompt, &request.params)
            .await
            .with_context(|| format!("Failed to generate the {} section", slot))?;

        let text = match slot {
            SectionSlot::Title => normalize_title(&raw),
            _ => raw.trim().to_string(),
        };
        if text.is_empty() {
            return Err(BlogError::Model(format!("the {} section came back empty", slot)).into());
        }

        let issues = models
            .corrector
            .check(&text)
            .await
            .with_context(|| format!("Failed to check grammar of the {} section", slot))?;
        debug!(section = %slot, issues = issues.len(), "section generated");
        *sections.slot_mut(slot) = models.corrector.correct(&text, &issues);
    }

    coherence::ensure_coherent(&sections.body(), models.embedder, request.coherence_threshold)
        .await?;
    info!(title = %sections.title, "generated sections passed all checks");

    Ok(sections)
}

/// 由校验通过的段落组装文章
pub fn compose_post(
    templates: &BlogTemplates,
    sections: &Sections,
    topic: &str,
    created_at: DateTime<Utc>,
    author: &AuthorConfig,
) -> Result<Post, BlogError> {
    let body = templates.render_article(sections, &author.bio)?;

    let tags = default_tags(topic);
    let mut front_matter = FrontMatter::new(&sections.title, created_at, &author.name, tags);
    front_matter.seo_title = Some(sections.title.clone());
    front_matter.seo_description = Some(summarize(&sections.introduction, SEO_DESCRIPTION_LIMIT));

    Ok(Post::new(created_at.date_naive(), front_matter, body))
}

/// 模型返回的标题只取第一行，并去掉 Markdown 标记与包裹的引号
fn normalize_title(raw: &str) -> String {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    line.trim_start_matches('#')
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '*')
        .trim()
        .to_string()
}

/// 取第一句话作为摘要，超长时按字符截断
fn summarize(text: &str, limit: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let sentence = match flat.find(". ") {
        Some(end) => &flat[..=end],
        None => flat.as_str(),
    };
    if sentence.chars().count() <= limit {
        return sentence.to_string();
    }
    let truncated: String = sentence.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", truncated.trim_end())
}

#[cfg(test)]
mod tests;
