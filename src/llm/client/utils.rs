//! Provider响应的边界归一化

/// 归一化provider回复
///
/// Provider的原始回复是多分段结构，SDK在下层已将首个候选的文本分段
/// 拼接为单个字符串；这里统一剥离NUL字符与回车，并修剪首尾空白，
/// 核心流水线不再接触provider特有的响应内部结构。
pub fn normalize_response(raw: &str) -> String {
    raw.replace('\u{0}', "").replace('\r', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_response;

    #[test]
    fn test_normalize_strips_nul_and_cr() {
        assert_eq!(normalize_response("a\u{0}b\r\nc"), "ab\nc");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_response("  report text \n"), "report text");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_response("\r\u{0}"), "");
    }
}
