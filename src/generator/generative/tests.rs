use super::*;
use crate::llm::capabilities::{GrammarIssue, PassthroughCorrector};
use crate::test_support::{ScriptedEmbedder, ScriptedGenerator};
use async_trait::async_trait;
use chrono::TimeZone;

/// 把 "teh" 纠正为 "the"
struct TypoCorrector;

#[async_trait]
impl GrammarCorrector for TypoCorrector {
    async fn check(&self, text: &str) -> anyhow::Result<Vec<GrammarIssue>> {
        let chars: Vec<char> = text.chars().collect();
        let mut issues = Vec::new();
        for start in 0..chars.len().saturating_sub(2) {
            if chars[start..start + 3] == ['t', 'e', 'h'] {
                issues.push(GrammarIssue {
                    offset: start,
                    length: 3,
                    message: String::from("Possible typo"),
                    replacements: vec![String::from("the")],
                    rule_id: Some(String::from("TYPO")),
                });
            }
        }
        Ok(issues)
    }
}

const REPLIES: [&str; 5] = [
    "## \"Zero Trust, Zero Excuses\"\nextra line",
    "  Attackers no longer respect teh perimeter. Zero trust assumes breach.  ",
    "- 60% of breaches involve identities",
    "Teams struggle with legacy systems and teh cost of segmentation.",
    "Start small, measure and expand.",
];

fn request() -> ArticleRequest<'static> {
    ArticleRequest {
        topic: "Zero Trust Architecture Implementation",
        headline: "Major ransomware attack targets healthcare sector",
        params: GenerationParams {
            max_length: 256,
            temperature: 0.5,
            seed: Some(7),
        },
        coherence_threshold: coherence::DEFAULT_THRESHOLD,
    }
}

#[tokio::test]
async fn test_generate_article_corrects_and_validates() {
    let generator = ScriptedGenerator::new(&REPLIES);
    let embedder = ScriptedEmbedder::coherent();
    let models = LanguageModels {
        generator: &generator,
        corrector: &TypoCorrector,
        embedder: &embedder,
    };

    let sections = generate_article(&request(), models).await.unwrap();

    assert_eq!(sections.title, "Zero Trust, Zero Excuses");
    assert_eq!(
        sections.introduction,
        "Attackers no longer respect the perimeter. Zero trust assumes breach."
    );
    assert_eq!(sections.facts, "- 60% of breaches involve identities");
    assert_eq!(
        sections.analysis,
        "Teams struggle with legacy systems and the cost of segmentation."
    );
    assert_eq!(sections.conclusion, "Start small, measure and expand.");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), SectionSlot::ALL.len());
    assert!(prompts.iter().all(|p| p.contains("Zero Trust Architecture Implementation")));
    assert!(prompts[1].contains("Major ransomware attack targets healthcare sector"));
}

#[tokio::test]
async fn test_generate_article_rejects_incoherent_sections() {
    let generator = ScriptedGenerator::new(&REPLIES);
    // facts 与 analysis 之间的相似度为 0.1
    let embedder = ScriptedEmbedder::with_gap_after_facts();
    let models = LanguageModels {
        generator: &generator,
        corrector: &PassthroughCorrector,
        embedder: &embedder,
    };

    let err = generate_article(&request(), models).await.unwrap_err();
    match err.downcast_ref::<BlogError>() {
        Some(BlogError::SemanticCoherence { first, second, .. }) => {
            assert_eq!((*first, *second), (1, 2));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_article_rejects_empty_section() {
    let generator = ScriptedGenerator::new(&["Title", "   ", "facts", "analysis", "conclusion"]);
    let embedder = ScriptedEmbedder::coherent();
    let models = LanguageModels {
        generator: &generator,
        corrector: &PassthroughCorrector,
        embedder: &embedder,
    };

    let err = generate_article(&request(), models).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BlogError>(),
        Some(BlogError::Model(message)) if message.contains("introduction")
    ));
}

#[tokio::test]
async fn test_generate_article_propagates_generator_failure() {
    let generator = ScriptedGenerator::new(&["Only a title"]);
    let embedder = ScriptedEmbedder::coherent();
    let models = LanguageModels {
        generator: &generator,
        corrector: &PassthroughCorrector,
        embedder: &embedder,
    };

    let err = generate_article(&request(), models).await.unwrap_err();
    assert!(err.to_string().contains("introduction"));
}

#[test]
fn test_compose_post_front_matter() {
    let templates = BlogTemplates::new().unwrap();
    let sections = Sections {
        title: String::from("Zero Trust: No More Perimeters"),
        introduction: String::from("Perimeters are gone.   Identity is the new edge. More text."),
        facts: String::from("Fact."),
        analysis: String::from("Analysis."),
        conclusion: String::from("Conclusion."),
    };
    let created_at = Utc.with_ymd_and_hms(2024, 5, 2, 6, 0, 0).unwrap();
    let author = AuthorConfig::default();

    let post = compose_post(
        &templates,
        &sections,
        "Zero Trust Architecture Implementation",
        created_at,
        &author,
    )
    .unwrap();

    assert_eq!(post.file_name(), "2024-05-02-zero-trust-no-more-perimeters.md");
    let front_matter = &post.front_matter;
    assert_eq!(front_matter.title, "Zero Trust: No More Perimeters");
    assert_eq!(front_matter.date, "2024-05-02 06:00:00 +0000");
    assert_eq!(front_matter.author, "Adam Rivers");
    assert_eq!(
        front_matter.tags.last().map(String::as_str),
        Some("zero-trust-architecture-implementation")
    );
    assert_eq!(front_matter.seo_title.as_deref(), Some("Zero Trust: No More Perimeters"));
    assert_eq!(
        front_matter.seo_description.as_deref(),
        Some("Perimeters are gone.")
    );
    assert!(front_matter.excerpt.is_none());
    assert!(post.body.contains("## Key Facts\n\nFact."));
}

#[test]
fn test_normalize_title() {
    assert_eq!(normalize_title("\n\n# \"Hello\"\nworld"), "Hello");
    assert_eq!(normalize_title("**Bold Title**"), "Bold Title");
    assert_eq!(normalize_title("   "), "");
}

#[test]
fn test_summarize_truncates() {
    let long = "word ".repeat(60);
    let summary = summarize(&long, 20);
    assert!(summary.ends_with("..."));
    assert!(summary.chars().count() <= 20);
    assert_eq!(summarize("No period here", 160), "No period here");
}
