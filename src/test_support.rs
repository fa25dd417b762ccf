//! 单元测试共用的桩实现

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use crate::error::BlogError;
use crate::generator::outlet::{CommitOutcome, VersionControl};
use crate::llm::capabilities::{Embedder, GenerationParams, TextGenerator};

/// 按顺序返回预设文本，并记录收到的提示词
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, _params: &GenerationParams) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted reply left"))
    }
}

/// 按顺序返回预设向量
pub struct ScriptedEmbedder {
    vectors: Mutex<VecDeque<Vec<f64>>>,
}

impl ScriptedEmbedder {
    pub fn new(vectors: Vec<Vec<f64>>) -> Self {
        Self {
            vectors: Mutex::new(vectors.into()),
        }
    }

    /// 四个两两相近的向量
    pub fn coherent() -> Self {
        Self::new(vec![
            vec![1.0, 0.1, 0.0],
            vec![0.9, 0.2, 0.1],
            vec![0.8, 0.3, 0.1],
            vec![0.9, 0.1, 0.2],
        ])
    }

    /// 第 1、2 段之间的余弦相似度为 0.1
    pub fn with_gap_after_facts() -> Self {
        let far = vec![0.1, (1.0f64 - 0.01).sqrt()];
        Self::new(vec![vec![1.0, 0.0], vec![1.0, 0.0], far.clone(), far])
    }
}

#[async_trait]
impl Embedder for ScriptedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f64>> {
        self.vectors
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted vector left"))
    }
}

/// 记录调用顺序，并按配置让某一步失败
#[derive(Default)]
pub struct RecordingVcs {
    pub calls: Mutex<Vec<String>>,
    pub not_a_repository: bool,
    pub fail_identity: bool,
    pub fail_stage: bool,
    /// git commit 失败时的输出
    pub commit_output: Option<String>,
    pub fail_push: bool,
}

impl RecordingVcs {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn vcs_error(command: &str, message: &str) -> BlogError {
    BlogError::VcsCommand {
        command: command.to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl VersionControl for RecordingVcs {
    fn is_repository(&self) -> bool {
        !self.not_a_repository
    }

    async fn configure_identity(&self, name: &str, email: &str) -> Result<(), BlogError> {
        self.record(format!("identity {} <{}>", name, email));
        if self.fail_identity {
            return Err(vcs_error("git config", "could not lock config file"));
        }
        Ok(())
    }

    async fn stage(&self, path: &Path) -> Result<(), BlogError> {
        self.record(format!("stage {}", path.display()));
        if self.fail_stage {
            return Err(vcs_error("git add", "pathspec did not match any files"));
        }
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<CommitOutcome, BlogError> {
        self.record(format!("commit {}", message));
        match &self.commit_output {
            Some(output) => {
                let err = vcs_error("git commit", output);
                if err.is_nothing_to_commit() {
                    Ok(CommitOutcome::NothingToCommit)
                } else {
                    Err(err)
                }
            }
            None => Ok(CommitOutcome::Committed),
        }
    }

    async fn push(&self) -> Result<(), BlogError> {
        self.record(String::from("push"));
        if self.fail_push {
            return Err(vcs_error("git push", "remote rejected"));
        }
        Ok(())
    }
}
