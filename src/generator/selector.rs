//! 随机选择主题、模板与素材
//!
//! 随机源由调用方注入，测试中使用固定种子的 `StdRng` 即可覆盖所有分支。

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::BlogError;

/// 从非空列表中等概率选择一个元素
pub fn choose<'a, T, R>(items: &'a [T], domain: &'static str, rng: &mut R) -> Result<&'a T, BlogError>
where
    R: Rng + ?Sized,
{
    items.choose(rng).ok_or(BlogError::EmptyDomain { domain })
}
