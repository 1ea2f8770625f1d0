//! 报告合成与精修的提示词模板

/// 报告合成的系统提示词
pub const SYNTHESIS_SYSTEM_PROMPT: &str =
    "You are a senior Market Research Analyst. You write concise, data-driven industry reports in professional business English, grounded strictly in the reference material you are given.";

/// 参考文档之间的拼接分隔符
pub const SOURCE_SEPARATOR: &str = "\n\n NEXT SOURCE\n\n";

/// 首轮起草提示词
pub fn build_initial_prompt(
    industry: &str,
    min_words: usize,
    max_words: usize,
    target_words: usize,
    context: &str,
) -> String {
    format!(
        r#"Write a market research report on the "{industry}" industry, based STRICTLY on the Wikipedia data below.

**HARD WORD COUNT LIMITS:**
- The report MUST be between {min_words} and {max_words} words.
- Aim for approximately {target_words} words.
- Do NOT exceed {max_words} words under any circumstances.

**STRUCTURE (use these exact section headings):**
1. EXECUTIVE SUMMARY
2. MARKET DYNAMICS & SIZE
3. KEY TECHNOLOGICAL OR SOCIAL TRENDS
4. COMPETITIVE LANDSCAPE
5. FUTURE OUTLOOK & CHALLENGES

**RULES:**
- Use ONLY facts found in the reference data. Do not invent figures.
- Write in professional business English.
- Output the report body only. No preamble, no closing remarks.

**WIKIPEDIA DATA:**
{context}"#
    )
}

/// 精修提示词，按当前草稿偏短或偏长给出相反的修订指令
pub fn build_refine_prompt(
    industry: &str,
    draft: &str,
    current_words: usize,
    min_words: usize,
    max_words: usize,
    context: &str,
) -> String {
    let instruction = if current_words < min_words {
        format!(
            "The draft is TOO SHORT. Expand it to between {min_words} and {max_words} words by adding substantive detail from the reference data. Do not pad with filler."
        )
    } else {
        format!(
            "The draft is TOO LONG. Trim it to between {min_words} and {max_words} words by removing the least essential sentences. Keep all five section headings."
        )
    };

    format!(
        r#"You are revising a market research report on the "{industry}" industry.

CURRENT COUNT: {current_words} words.
{instruction}

Keep the exact section structure. Ground every statement in the reference data. Output the revised report only.

**WIKIPEDIA DATA:**
{context}

**CURRENT DRAFT:**
{draft}"#
    )
}
