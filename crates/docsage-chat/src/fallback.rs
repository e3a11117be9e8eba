//! Rule-based answer generation, used when no model is available.
//!
//! Picks an extraction strategy from keywords in the query and assembles
//! an answer from matching lines of the retrieved chunks.

use docsage_core::text::{split_sentences, truncate_text};
use docsage_store::SearchResult;

/// Canned reply for an empty result set.
pub const NO_RESULTS_REPLY: &str = "抱歉，没有找到相关信息。";

/// Build an answer from retrieved chunks without calling a model.
pub fn rule_based_answer(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS_REPLY.to_string();
    }

    let query_lower = query.to_lowercase();
    let mut body = String::new();
    let header;

    if ["流程", "步骤", "怎么", "如何"].iter().any(|k| query_lower.contains(k)) {
        header = "根据文档内容，相关流程如下：\n\n";
        for (i, result) in results.iter().enumerate() {
            let steps = extract_process_steps(&result.document.content);
            if !steps.is_empty() {
                body.push_str(&format!("{}. {}\n", i + 1, truncate_text(&steps, 200)));
            }
        }
    } else if ["时间", "多久"].iter().any(|k| query_lower.contains(k)) {
        header = "根据文档中的时间信息：\n\n";
        for result in results {
            let info = extract_time_info(&result.document.content);
            if !info.is_empty() {
                body.push_str(&format!("• {}\n", info));
            }
        }
    } else if ["联系", "客服", "电话"].iter().any(|k| query_lower.contains(k)) {
        header = "根据文档中的联系方式：\n\n";
        for result in results {
            let contacts = extract_contact_info(&result.document.content);
            if !contacts.is_empty() {
                body.push_str(&format!("• {}\n", contacts));
            }
        }
    } else {
        header = "根据文档信息：\n\n";
        for (i, result) in results.iter().enumerate() {
            body.push_str(&format!(
                "{}. {}\n\n",
                i + 1,
                truncate_text(&result.document.content, 150)
            ));
        }
    }

    if body.is_empty() {
        return "文档中没有找到明确的相关信息。".to_string();
    }
    format!("{}{}", header, body)
}

/// Pull step-like lines (numbered items, imperative action keywords).
fn extract_process_steps(content: &str) -> String {
    const STEP_PREFIXES: [&str; 10] = ["1.", "2.", "3.", "4.", "5.", "6.", "a.", "b.", "c.", "d."];
    const STEP_KEYWORDS: [&str; 8] = ["第一步", "第二步", "登录", "进入", "选择", "点击", "提交", "等待"];

    let steps: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| {
            STEP_PREFIXES.iter().any(|p| line.starts_with(p))
                || STEP_KEYWORDS.iter().any(|k| line.contains(k))
        })
        .collect();
    if !steps.is_empty() {
        return steps.join("\n");
    }

    // No explicit steps: fall back to the first sentence.
    split_sentences(content).into_iter().next().unwrap_or_default()
}

/// Pull lines mentioning durations, deadlines, or review times.
fn extract_time_info(content: &str) -> String {
    const TIME_KEYWORDS: [&str; 8] = ["工作日", "小时", "天", "分钟", "时间", "审核", "到账", "期限"];

    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| TIME_KEYWORDS.iter().any(|k| line.contains(k)))
        .collect();
    lines.join("; ")
}

/// Pull lines with contact channels (mail, phone, support, IM).
fn extract_contact_info(content: &str) -> String {
    const CONTACT_KEYWORDS: [&str; 7] = ["@", "邮箱", "电话", "客服", "400-", "微信", "QQ"];

    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| CONTACT_KEYWORDS.iter().any(|k| line.contains(k)))
        .collect();
    lines.join("; ")
}
