use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::BlogError;

/// 提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// 工作区没有可提交的变化，视为正常情况
    NothingToCommit,
}

/// 版本控制操作
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// 工作目录是否处于版本控制之下
    fn is_repository(&self) -> bool;

    async fn configure_identity(&self, name: &str, email: &str) -> Result<(), BlogError>;

    async fn stage(&self, path: &Path) -> Result<(), BlogError>;

    async fn commit(&self, message: &str) -> Result<CommitOutcome, BlogError>;

    async fn push(&self) -> Result<(), BlogError>;
}

/// 调用本机 git 命令
///
/// 所有命令都在仓库根目录执行，仓库以根目录下存在 `.git` 识别。
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// git 在仓库根目录执行，以 repo_root 开头的路径需要去掉前缀；其余路径原样使用
    fn relative_to_root<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.repo_root).unwrap_or(path)
    }

    /// 执行一条 git 命令，返回标准输出
    async fn run(&self, args: &[&str]) -> Result<String, BlogError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, "running git");

        let output = TokioCommand::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| BlogError::VcsCommand {
                command: command.clone(),
                message: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() {
            return Ok(stdout);
        }

        // git commit 把 "nothing to commit" 写到标准输出，两路输出都保留
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = [stderr, stdout]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Err(BlogError::VcsCommand {
            command,
            message: if message.is_empty() {
                format!("exit status {}", output.status.code().unwrap_or(-1))
            } else {
                message
            },
        })
    }
}

#[async_trait]
impl VersionControl for GitCli {
    fn is_repository(&self) -> bool {
        self.repo_root.join(".git").exists()
    }

    async fn configure_identity(&self, name: &str, email: &str) -> Result<(), BlogError> {
        self.run(&["config", "user.name", name]).await?;
        self.run(&["config", "user.email", email]).await?;
        Ok(())
    }

    async fn stage(&self, path: &Path) -> Result<(), BlogError> {
        let path = self.relative_to_root(path).to_string_lossy();
        self.run(&["add", "--", path.as_ref()]).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<CommitOutcome, BlogError> {
        match self.run(&["commit", "-m", message]).await {
            Ok(_) => Ok(CommitOutcome::Committed),
            Err(e) if e.is_nothing_to_commit() => Ok(CommitOutcome::NothingToCommit),
            Err(e) => Err(e),
        }
    }

    async fn push(&self) -> Result<(), BlogError> {
        self.run(&["push"]).await?;
        Ok(())
    }
}
