use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;

use crate::config::Config;
use crate::generator::template::BlogTemplates;

/// 一次运行的上下文
pub struct GeneratorContext {
    /// 配置
    pub config: Config,
    /// 编译好的文章模板
    pub templates: BlogTemplates,
    /// 文章时间戳，写入 frontmatter 的 `date`
    pub created_at: DateTime<Utc>,
}

impl GeneratorContext {
    /// 以当前时间创建上下文
    pub fn new(config: Config) -> Result<Self> {
        Self::at(config, Utc::now())
    }

    /// 以指定时间创建上下文；配置了 `date` 时只替换日期部分，保留时刻
    pub fn at(config: Config, now: DateTime<Utc>) -> Result<Self> {
        let created_at = match config.date {
            Some(date) => date.and_time(now.time()).and_utc(),
            None => now,
        };
        let templates = BlogTemplates::new()?;

        Ok(Self {
            config,
            templates,
            created_at,
        })
    }

    /// 本次运行对应的日历日
    pub fn run_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// 文章目录
    pub fn posts_path(&self) -> PathBuf {
        self.config.posts_path()
    }
}
