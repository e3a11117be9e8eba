//! Prompt templates for retrieval-augmented answers.
//!
//! Templates are Chinese because the target corpus is Chinese
//! customer-service documentation.

use docsage_store::Document;

/// General document-QA prompt: system directive, numbered sources, query.
pub fn build_rag_prompt(query: &str, context: &[Document]) -> String {
    let mut prompt = String::new();
    prompt.push_str("你是一个专业的文档问答助手。请根据提供的文档内容准确回答问题。\n");
    prompt.push_str("如果文档中没有相关信息，请诚实地告知用户。\n\n");
    prompt.push_str("相关文档内容：\n");
    for (i, doc) in context.iter().enumerate() {
        prompt.push_str(&format!("【来源{}:{}】\n", i + 1, doc.filename));
        prompt.push_str(&doc.content);
        prompt.push_str("\n\n");
    }
    prompt.push_str("基于以上文档内容，请回答以下问题：\n");
    prompt.push_str(&format!("问题：{}\n\n", query));
    prompt.push_str("回答：");
    prompt
}

/// Refund-specific prompt with stricter answer directives.
pub fn build_refund_prompt(query: &str, context: &[Document]) -> String {
    let mut prompt = String::new();
    prompt.push_str("你是一个专业的电商客服助手，专门处理退款相关咨询。\n");
    prompt.push_str("请根据提供的文档信息，清晰、准确地回答用户的退款流程问题。\n\n");
    prompt.push_str("相关文档信息：\n");
    for (i, doc) in context.iter().enumerate() {
        prompt.push_str(&format!("===== 文档 {} ======\n", i + 1));
        prompt.push_str(&doc.content);
        prompt.push_str("\n\n");
    }
    prompt.push_str("用户问题：");
    prompt.push_str(query);
    prompt.push_str("\n\n");
    prompt.push_str("请按照以下要求回答：\n");
    prompt.push_str("1. 如果文档中有明确的退款流程，请分步骤说明\n");
    prompt.push_str("2. 如果文档中有时间要求，请明确指出\n");
    prompt.push_str("3. 如果文档中有联系方式，请提供\n");
    prompt.push_str("4. 使用友好、专业的语气\n");
    prompt.push_str("5. 如果文档中没有相关信息，请诚实地告知\n\n");
    prompt.push_str("回答：");
    prompt
}
