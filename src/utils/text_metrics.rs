//! 文本度量 - 统一的字数统计与长度约束
//!
//! 所有消费方（分类器、合成器、工作流）共用同一套字数口径，
//! 保证阈值之间可以互相比较。

use regex::Regex;
use std::sync::OnceLock;

use crate::types::ReportStatus;

/// 单词定义：连续的`[A-Za-z0-9_]`字符，纯标点不计为单词
fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9_]+").unwrap())
}

/// 模型常见的对话式开场白，统计字数前需要剥离
fn preamble_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)^(?:here is|certainly|sure|as requested).*?:\n*").unwrap())
}

/// 统计文本的字数
pub fn word_count(text: &str) -> usize {
    word_regex().find_iter(text).count()
}

/// 按字符数截断文本，保证不落在UTF-8字符中间
pub fn truncate_to_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// 剥离模型前置的对话式填充（"Here is / Certainly / Sure / As requested ...:"）
///
/// 这类填充会虚增表观字数但不构成报告内容，必须在统计前确定性地去掉。
pub fn strip_preamble(text: &str) -> String {
    preamble_regex().replace(text, "").trim().to_string()
}

/// 将文本约束到目标字数区间
///
/// - 超过上限：在第`max_words`个单词边界后切断，再从切点向前回扫
///   最近的句子终结符（`.` `!` `?`），找到且剩余内容非空则修剪到该处；
///   否则保留硬切结果。状态为`Truncated`。
/// - 低于下限：文本原样返回，状态为`TooShort`。
/// - 区间内：文本原样返回，状态为`Ok`。
///
/// 契约：返回文本的字数恒不超过`max_words`，且截断不会劈开单词。
pub fn enforce_word_limits(
    text: &str,
    min_words: usize,
    max_words: usize,
) -> (String, ReportStatus) {
    let words: Vec<_> = word_regex().find_iter(text).collect();
    let count = words.len();

    if count > max_words {
        let cut_end = if max_words == 0 {
            0
        } else {
            words[max_words - 1].end()
        };
        let prefix = &text[..cut_end];

        // 回扫句子终结符，避免在句子中间收尾
        let trimmed = match prefix.rfind(['.', '!', '?']) {
            Some(pos) if word_count(&prefix[..=pos]) > 0 => &prefix[..=pos],
            _ => prefix,
        };
        return (trimmed.to_string(), ReportStatus::Truncated);
    }

    if count < min_words {
        return (text.to_string(), ReportStatus::TooShort);
    }

    (text.to_string(), ReportStatus::Ok)
}
