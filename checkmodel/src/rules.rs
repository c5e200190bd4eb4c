//! 常用的校验规则
//!
//! 在校验方法内部使用，每个规则都传入出错时要展示的原因。

use crate::error::{CheckError, CheckResult};
use crate::verdict::Verdict;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// 字符串非空
pub fn not_empty(value: &str, reason: &str) -> Verdict {
    Verdict::when(value.is_empty(), reason)
}

/// 字符串非空白
pub fn not_blank(value: &str, reason: &str) -> Verdict {
    Verdict::when(value.trim().is_empty(), reason)
}

/// 字符数在 `[min, max]` 之间
pub fn length(value: &str, min: Option<usize>, max: Option<usize>, reason: &str) -> Verdict {
    let len = value.chars().count();
    let too_short = min.is_some_and(|min| len < min);
    let too_long = max.is_some_and(|max| len > max);
    Verdict::when(too_short || too_long, reason)
}

/// 数值在 `[min, max]` 之间
pub fn range<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>, reason: &str) -> Verdict {
    let below = min.is_some_and(|min| value < min);
    let above = max.is_some_and(|max| value > max);
    Verdict::when(below || above, reason)
}

/// 邮箱格式
pub fn email(value: &str, reason: &str) -> Verdict {
    Verdict::when(!EMAIL_REGEX.is_match(value), reason)
}

/// 匹配正则表达式
pub fn pattern(value: &str, pattern: &str, reason: &str) -> CheckResult<Verdict> {
    let regex = Regex::new(pattern).map_err(|e| CheckError::invalid_pattern(pattern, e))?;
    Ok(Verdict::when(!regex.is_match(value), reason))
}
