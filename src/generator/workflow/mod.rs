use crate::config::{Config, PipelineKind};
use crate::error::BlogError;
use crate::generator::context::GeneratorContext;
use crate::generator::generative::{self, ArticleRequest, LanguageModels};
use crate::generator::guard::find_existing_post;
use crate::generator::outlet::{
    DiskOutlet, GitCli, Outlet, PublishStatus, VersionControl, publish,
};
use crate::generator::post::{FrontMatter, Post, default_tags};
use crate::generator::selector::choose;
use crate::generator::topics::{HEADLINES, TOPICS, find_topic};
use crate::llm::{
    GenerationParams, GrammarCorrector, LLMClient, LanguageToolClient, PassthroughCorrector,
};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<&'static str, Instant>,
    phase_durations: Vec<(&'static str, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &'static str) {
        self.phase_start_times.insert(phase_name, Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &'static str) -> Option<Duration> {
        let start_time = self.phase_start_times.remove(phase_name)?;
        let duration = start_time.elapsed();
        self.phase_durations.push((phase_name, duration));
        Some(duration)
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.start_time.elapsed().as_secs_f64()
        );
        for (phase, duration) in &self.phase_durations {
            report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
        }
        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const GUARD: &'static str = "guard";
    pub const COMPOSE: &'static str = "compose";
    pub const OUTPUT: &'static str = "output";
    pub const PUBLISH: &'static str = "publish";
}

/// 文章的生成方式及其所需的外部模型
pub enum Pipeline<'a> {
    Template,
    Generative(LanguageModels<'a>),
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// 当天已有文章，未做任何修改
    Skipped { existing: PathBuf },
    /// 已写入新文章
    Published {
        path: PathBuf,
        title: String,
        publish: PublishStatus,
    },
}

/// 启动文章生成工作流
pub async fn launch(config: &Config) -> Result<RunOutcome> {
    let context = GeneratorContext::new(config.clone())?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let vcs = GitCli::new(&config.repo_root);

    info!(pipeline = %config.pipeline, date = %context.run_date(), "🚀 开始生成博客文章");

    match config.pipeline {
        PipelineKind::Template => run(&context, Pipeline::Template, &vcs, &mut rng).await,
        PipelineKind::Generative => {
            let llm = LLMClient::new(&config.llm)?;
            let corrector: Box<dyn GrammarCorrector> = if config.grammar.enabled {
                Box::new(LanguageToolClient::new(&config.grammar)?)
            } else {
                Box::new(PassthroughCorrector)
            };
            let models = LanguageModels {
                generator: &llm,
                corrector: corrector.as_ref(),
                embedder: &llm,
            };
            run(&context, Pipeline::Generative(models), &vcs, &mut rng).await
        }
    }
}

/// 执行一次完整的生成流程：幂等检查 → 选题 → 组装 → 写入 → 发布
pub async fn run<R>(
    context: &GeneratorContext,
    pipeline: Pipeline<'_>,
    vcs: &dyn VersionControl,
    rng: &mut R,
) -> Result<RunOutcome>
where
    R: Rng + ?Sized,
{
    let config = &context.config;
    let posts_path = context.posts_path();
    let mut timing = TimingScope::new();

    timing.start_phase(TimingKeys::GUARD);
    if !config.force
        && let Some(existing) = find_existing_post(&posts_path, context.run_date())?
    {
        info!(existing = %existing.display(), "⏭️ 今天的文章已存在，跳过生成");
        return Ok(RunOutcome::Skipped { existing });
    }
    timing.end_phase(TimingKeys::GUARD);

    timing.start_phase(TimingKeys::COMPOSE);
    let topic = select_topic(config.topic.as_deref(), rng)?;
    info!(topic, "📝 已选择主题");
    let post = match pipeline {
        Pipeline::Template => compose_template_post(context, topic, rng)?,
        Pipeline::Generative(models) => {
            let headline = *choose(HEADLINES, "headline", rng)?;
            let request = ArticleRequest {
                topic,
                headline,
                params: GenerationParams::from(&config.llm),
                coherence_threshold: config.coherence.threshold,
            };
            let sections = generative::generate_article(&request, models).await?;
            generative::compose_post(
                &context.templates,
                &sections,
                topic,
                context.created_at,
                &config.author,
            )?
        }
    };
    timing.end_phase(TimingKeys::COMPOSE);

    timing.start_phase(TimingKeys::OUTPUT);
    let path = DiskOutlet::new(&posts_path)
        .save(&post)
        .await
        .context("Failed to write the blog post")?;
    timing.end_phase(TimingKeys::OUTPUT);

    timing.start_phase(TimingKeys::PUBLISH);
    let publish_status = if !config.publish.enabled {
        info!("发布已关闭，跳过 git 提交");
        PublishStatus::Disabled
    } else if !vcs.is_repository() {
        info!("不在 git 仓库中，跳过提交与推送");
        PublishStatus::NotARepository
    } else {
        PublishStatus::Attempted(publish(vcs, &config.publish, &path).await)
    };
    timing.end_phase(TimingKeys::PUBLISH);

    debug!("\n{}", timing.generate_timing_report());
    info!(path = %path.display(), "✅ 博客文章生成完成");

    Ok(RunOutcome::Published {
        path,
        title: post.front_matter.title,
        publish: publish_status,
    })
}

/// 使用指定主题（必须在主题列表中）或随机选择
fn select_topic<R>(forced: Option<&str>, rng: &mut R) -> Result<&'static str, BlogError>
where
    R: Rng + ?Sized,
{
    match forced {
        Some(name) => find_topic(name).ok_or_else(|| BlogError::UnknownTopic(name.to_string())),
        None => choose(TOPICS, "topic", rng).copied(),
    }
}

/// 模板管线的文章组装
fn compose_template_post<R>(
    context: &GeneratorContext,
    topic: &str,
    rng: &mut R,
) -> Result<Post, BlogError>
where
    R: Rng + ?Sized,
{
    let author = &context.config.author;
    let (kind, body) = context.templates.render_random(topic, &author.bio, rng)?;
    debug!(template = %kind, "rendered template");

    let tags = default_tags(topic);
    let mut front_matter = FrontMatter::new(topic, context.created_at, &author.name, tags);
    front_matter.excerpt = Some(format!(
        "Latest insights on {} and its implications for modern cybersecurity strategies.",
        topic.to_lowercase()
    ));

    Ok(Post::new(context.run_date(), front_matter, body))
}
