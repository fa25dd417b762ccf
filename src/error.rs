//! 博客生成过程中的类型化错误
//!
//! 内容生成失败是致命的，发布（git）失败只记录日志。上层统一使用 `anyhow::Result`，
//! 需要区分错误类型时通过 `downcast_ref::<BlogError>()` 取回。

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    /// 候选列表为空，无法随机选择
    #[error("cannot choose from an empty {domain} list")]
    EmptyDomain { domain: &'static str },

    /// 相邻段落的语义相似度低于阈值
    #[error(
        "sections {first} and {second} are not coherent: similarity {similarity:.3} is below {threshold}"
    )]
    SemanticCoherence {
        first: usize,
        second: usize,
        similarity: f64,
        threshold: f64,
    },

    /// 目录创建或文件写入失败
    #[error("filesystem error at {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// git 命令执行失败
    #[error("`{command}` failed: {message}")]
    VcsCommand { command: String, message: String },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// frontmatter 缺失或无法解析
    #[error("invalid frontmatter: {0}")]
    FrontMatter(String),

    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// 外部模型调用失败
    #[error("model error: {0}")]
    Model(String),
}

impl BlogError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// git 在没有可提交内容时的输出
    pub fn is_nothing_to_commit(&self) -> bool {
        match self {
            BlogError::VcsCommand { message, .. } => {
                let lowered = message.to_lowercase();
                lowered.contains("nothing to commit") || lowered.contains("nothing added to commit")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_commit_detection() {
        let err = BlogError::VcsCommand {
            command: "git commit".to_string(),
            message: "On branch main\nnothing to commit, working tree clean".to_string(),
        };
        assert!(err.is_nothing_to_commit());

        let err = BlogError::VcsCommand {
            command: "git push".to_string(),
            message: "fatal: no upstream configured".to_string(),
        };
        assert!(!err.is_nothing_to_commit());
    }

    #[test]
    fn test_semantic_coherence_message_names_pair() {
        let err = BlogError::SemanticCoherence {
            first: 1,
            second: 2,
            similarity: 0.1,
            threshold: 0.3,
        };
        let message = err.to_string();
        assert!(message.contains("sections 1 and 2"));
        assert!(message.contains("0.100"));
    }
}
