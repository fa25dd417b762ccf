use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::PublishConfig;
use crate::error::BlogError;
use crate::generator::post::Post;

pub mod git;

pub use git::{CommitOutcome, GitCli, VersionControl};

#[allow(async_fn_in_trait)]
pub trait Outlet {
    async fn save(&self, post: &Post) -> Result<PathBuf>;
}

/// 把文章写入文章目录
pub struct DiskOutlet {
    posts_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, post: &Post) -> Result<PathBuf> {
        let post_path = write_post(&self.posts_dir, post).await?;
        info!(path = %post_path.display(), "💾 已保存文章");
        Ok(post_path)
    }
}

/// 把文章写入目录（不存在时创建），返回文件路径
pub async fn write_post(posts_dir: &Path, post: &Post) -> Result<PathBuf, BlogError> {
    tokio::fs::create_dir_all(posts_dir)
        .await
        .map_err(|e| BlogError::filesystem(posts_dir, e))?;

    let post_path = posts_dir.join(post.file_name());
    tokio::fs::write(&post_path, post.render())
        .await
        .map_err(|e| BlogError::filesystem(&post_path, e))?;
    Ok(post_path)
}

/// 单个发布步骤的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    /// 前置步骤失败或无需执行
    Skipped,
    /// 提交时工作区没有变化
    NothingToCommit,
    Failed(String),
}

/// 一次 git 发布的逐步结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub identity: StepStatus,
    pub stage: StepStatus,
    pub commit: StepStatus,
    pub push: StepStatus,
}

impl PublishReport {
    /// 提交并推送都成功
    pub fn is_published(&self) -> bool {
        self.commit == StepStatus::Done && self.push == StepStatus::Done
    }
}

/// 发布阶段的整体状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStatus {
    Disabled,
    NotARepository,
    Attempted(PublishReport),
}

/// 提交信息
pub fn commit_message(post_path: &Path) -> String {
    let stem = post_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("Add new blog post: {}", stem)
}

/// 尽力而为地提交并推送文章，任何步骤失败都只记录日志
///
/// 身份配置失败不影响后续步骤；暂存失败则不再提交，提交失败或无内容可提交则不再推送。
pub async fn publish(
    vcs: &dyn VersionControl,
    identity: &PublishConfig,
    post_path: &Path,
) -> PublishReport {
    let identity_status = match vcs
        .configure_identity(&identity.git_user_name, &identity.git_user_email)
        .await
    {
        Ok(()) => StepStatus::Done,
        Err(e) => failed("configure identity", e),
    };

    let stage = match vcs.stage(post_path).await {
        Ok(()) => StepStatus::Done,
        Err(e) => failed("stage", e),
    };

    let commit = if stage != StepStatus::Done {
        StepStatus::Skipped
    } else {
        match vcs.commit(&commit_message(post_path)).await {
            Ok(CommitOutcome::Committed) => StepStatus::Done,
            Ok(CommitOutcome::NothingToCommit) => {
                info!("ℹ️ 没有需要提交的变更");
                StepStatus::NothingToCommit
            }
            Err(e) => failed("commit", e),
        }
    };

    let push = if commit != StepStatus::Done {
        StepStatus::Skipped
    } else {
        match vcs.push().await {
            Ok(()) => StepStatus::Done,
            Err(e) => failed("push", e),
        }
    };

    let report = PublishReport {
        identity: identity_status,
        stage,
        commit,
        push,
    };
    if report.is_published() {
        info!(path = %post_path.display(), "🚀 已提交并推送文章");
    }
    report
}

fn failed(step: &str, error: BlogError) -> StepStatus {
    warn!(step, error = %error, "⚠️ git 操作失败，文章已写入但未发布");
    StepStatus::Failed(error.to_string())
}
