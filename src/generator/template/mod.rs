//! 模板管线：把主题代入固定的叙事骨架
//!
//! 骨架以 Tera 模板的形式编译进二进制（`templates/*.md.tera`），
//! 渲染是主题与组织画像的纯函数。

use rand::Rng;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::BlogError;
use crate::generator::selector::choose;

pub mod organization;

pub use organization::OrganizationProfile;

/// 生成式管线使用的正文模板名
pub const ARTICLE_TEMPLATE: &str = "article.md";

/// 叙事骨架类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TemplateKind {
    TechnicalGuide,
    IndustryAnalysis,
    BestPractices,
    CaseStudy,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::TechnicalGuide,
        TemplateKind::IndustryAnalysis,
        TemplateKind::BestPractices,
        TemplateKind::CaseStudy,
    ];

    /// 模板注册名
    pub fn template_name(&self) -> &'static str {
        match self {
            TemplateKind::TechnicalGuide => "technical_guide.md",
            TemplateKind::IndustryAnalysis => "industry_analysis.md",
            TemplateKind::BestPractices => "best_practices.md",
            TemplateKind::CaseStudy => "case_study.md",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            TemplateKind::TechnicalGuide => "technical guide",
            TemplateKind::IndustryAnalysis => "industry analysis",
            TemplateKind::BestPractices => "best practices",
            TemplateKind::CaseStudy => "case study",
        };
        write!(f, "{}", str)
    }
}

/// 编译好的全部文章模板
pub struct BlogTemplates {
    tera: Tera,
}

impl BlogTemplates {
    pub fn new() -> Result<Self, BlogError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                TemplateKind::TechnicalGuide.template_name(),
                include_str!("../../../templates/technical_guide.md.tera"),
            ),
            (
                TemplateKind::IndustryAnalysis.template_name(),
                include_str!("../../../templates/industry_analysis.md.tera"),
            ),
            (
                TemplateKind::BestPractices.template_name(),
                include_str!("../../../templates/best_practices.md.tera"),
            ),
            (
                TemplateKind::CaseStudy.template_name(),
                include_str!("../../../templates/case_study.md.tera"),
            ),
            (
                ARTICLE_TEMPLATE,
                include_str!("../../../templates/article.md.tera"),
            ),
        ])?;
        Ok(Self { tera })
    }

    /// 随机选择骨架（案例分析还会随机选择组织画像）并渲染
    pub fn render_random<R>(
        &self,
        topic: &str,
        author_bio: &str,
        rng: &mut R,
    ) -> Result<(TemplateKind, String), BlogError>
    where
        R: Rng + ?Sized,
    {
        let kind = *choose(&TemplateKind::ALL, "template", rng)?;
        let organization = match kind {
            TemplateKind::CaseStudy => Some(*choose(&OrganizationProfile::ALL, "organization", rng)?),
            _ => None,
        };
        let body = self.render(kind, topic, author_bio, organization)?;
        Ok((kind, body))
    }

    /// 渲染指定骨架
    ///
    /// 案例分析缺少组织画像时使用列表中的第一个。
    pub fn render(
        &self,
        kind: TemplateKind,
        topic: &str,
        author_bio: &str,
        organization: Option<OrganizationProfile>,
    ) -> Result<String, BlogError> {
        let mut ctx = Context::new();
        ctx.insert("topic", topic);
        ctx.insert("author_bio", author_bio);
        if kind == TemplateKind::CaseStudy {
            let profile = organization.unwrap_or(OrganizationProfile::ALL[0]);
            ctx.insert("organization", &profile.facts());
        }
        let rendered = self.tera.render(kind.template_name(), &ctx)?;
        Ok(rendered.trim().to_string())
    }

    /// 渲染生成式管线的正文
    pub fn render_article<S: Serialize>(&self, sections: &S, author_bio: &str) -> Result<String, BlogError> {
        let mut ctx = Context::from_serialize(sections)?;
        ctx.insert("author_bio", author_bio);
        let rendered = self.tera.render(ARTICLE_TEMPLATE, &ctx)?;
        Ok(rendered.trim().to_string())
    }
}
