//! 每日幂等检查：同一天只生成一篇文章

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::generator::post::date_prefix;

/// 查找文章目录中以指定日期开头的文章
///
/// 目录不存在视为没有文章；存在多个时返回按文件名排序的第一个。
pub fn find_existing_post(posts_dir: &Path, date: NaiveDate) -> Result<Option<PathBuf>> {
    if !posts_dir.is_dir() {
        return Ok(None);
    }

    let escaped_dir = glob::Pattern::escape(&posts_dir.to_string_lossy());
    let pattern = format!(
        "{}/{}*.md",
        escaped_dir.trim_end_matches('/'),
        date_prefix(date)
    );

    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid posts pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    matches.sort();

    Ok(matches.into_iter().next())
}
