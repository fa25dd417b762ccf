//! 文章模型：frontmatter、正文与文件名
//!
//! 渲染格式与 Jekyll 的 `_posts` 约定一致：
//!
//! ```text
//! ---
//! layout: post
//! title: "Zero Trust Architecture Implementation"
//! date: 2024-03-01 09:30:00 +0000
//! ...
//! ---
//!
//! # 正文
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::BlogError;

/// frontmatter 中 `date` 字段的格式
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S +0000";

/// 文件名中的日期前缀格式
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

const DELIMITER: &str = "---";

static PLAIN_SCALAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _.-]*$").unwrap());
static REPEATED_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// 文章元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub layout: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

impl FrontMatter {
    /// 两条管线共用的必填字段，excerpt/seo 字段由调用方补充
    pub fn new(title: &str, created_at: DateTime<Utc>, author: &str, tags: Vec<String>) -> Self {
        Self {
            layout: String::from("post"),
            title: title.to_string(),
            date: created_at.format(DATE_FORMAT).to_string(),
            categories: vec![String::from("cybersecurity")],
            tags,
            author: author.to_string(),
            excerpt: None,
            seo_title: None,
            seo_description: None,
        }
    }

    /// 渲染为 YAML 文本（不含分隔线）
    pub fn to_yaml(&self) -> String {
        let mut lines = vec![
            format!("layout: {}", scalar(&self.layout)),
            format!("title: {}", quoted(&self.title)),
            format!("date: {}", self.date),
            format!("categories: {}", flow_list(&self.categories)),
            format!("tags: {}", flow_list(&self.tags)),
            format!("author: {}", scalar(&self.author)),
        ];
        if let Some(excerpt) = &self.excerpt {
            lines.push(format!("excerpt: {}", quoted(excerpt)));
        }
        if let Some(seo_title) = &self.seo_title {
            lines.push(format!("seo_title: {}", quoted(seo_title)));
        }
        if let Some(seo_description) = &self.seo_description {
            lines.push(format!("seo_description: {}", quoted(seo_description)));
        }
        lines.join("\n")
    }
}

/// 两条管线共用的标签：固定的三个分类标签加主题的 slug
pub fn default_tags(topic: &str) -> Vec<String> {
    vec![
        String::from("cybersecurity"),
        String::from("security"),
        String::from("technology"),
        slugify(topic),
    ]
}

/// 一篇完整的文章，写入磁盘后不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// 文章所属的日历日，决定文件名前缀
    pub date: NaiveDate,
    pub front_matter: FrontMatter,
    pub body: String,
}

impl Post {
    pub fn new(date: NaiveDate, front_matter: FrontMatter, body: String) -> Self {
        Self {
            date,
            front_matter,
            body,
        }
    }

    /// `<YYYY-MM-DD>-<slug>.md`
    pub fn file_name(&self) -> String {
        let slug = slugify(&self.front_matter.title);
        let slug = if slug.is_empty() {
            String::from("post")
        } else {
            slug
        };
        format!("{}{}.md", date_prefix(self.date), slug)
    }

    /// frontmatter + 空行 + 正文
    pub fn render(&self) -> String {
        let mut document = String::new();
        document.push_str(DELIMITER);
        document.push('\n');
        document.push_str(&self.front_matter.to_yaml());
        document.push('\n');
        document.push_str(DELIMITER);
        document.push_str("\n\n");
        document.push_str(self.body.trim_end());
        document.push('\n');
        document
    }
}

/// 某一天的文章文件名前缀，例如 `2024-03-01-`
pub fn date_prefix(date: NaiveDate) -> String {
    format!("{}-", date.format(FILE_DATE_FORMAT))
}

/// 标题转为文件名/URL安全的 slug
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase().replace(':', "");
    let mut slug = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            slug.push('-');
        } else if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        }
    }
    REPEATED_HYPHENS
        .replace_all(&slug, "-")
        .trim_matches('-')
        .to_string()
}

/// 拆分文档为 (frontmatter YAML, 正文)
pub fn split_front_matter(document: &str) -> Option<(&str, &str)> {
    let document = document.strip_prefix('\u{feff}').unwrap_or(document);
    let rest = document
        .strip_prefix("---\n")
        .or_else(|| document.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }
    None
}

/// 从渲染后的文档中解析 frontmatter
pub fn parse_front_matter(document: &str) -> Result<FrontMatter, BlogError> {
    let (yaml, _) = split_front_matter(document)
        .ok_or_else(|| BlogError::FrontMatter(String::from("missing `---` delimited block")))?;
    serde_yaml_ng::from_str(yaml).map_err(|e| BlogError::FrontMatter(e.to_string()))
}

fn quoted(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ");
    format!("\"{}\"", escaped)
}

fn scalar(value: &str) -> String {
    if PLAIN_SCALAR.is_match(value) {
        value.to_string()
    } else {
        quoted(value)
    }
}

fn flow_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| scalar(v)).collect();
    format!("[{}]", items.join(", "))
}
