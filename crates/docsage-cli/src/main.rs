//! docsage — local document question answering over a hashed-embedding
//! vector store.

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docsage_chat::{fallback::rule_based_answer, GenerateOptions, Generator, OllamaClient};
use docsage_core::text::truncate_text;
use docsage_core::{AppConfig, LlmConfig};
use docsage_infer::HashingEmbedder;
use docsage_resolve::Retriever;
use docsage_store::{SearchResult, VectorStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args[1] != "docs" {
        print_usage();
        return Ok(());
    }
    let query = args[2..].join(" ");

    let app = AppConfig::from_env();
    let llm = LlmConfig::from_env();
    info!(
        "docsage starting: docs={} store={} mode={} model={}",
        app.docs_path.display(),
        app.store_path.display(),
        llm.mode,
        llm.model
    );

    let embedder = Arc::new(HashingEmbedder::new(app.embedding_dim)?);
    let store = Arc::new(VectorStore::new(embedder));
    let retriever = Retriever::new(store.clone(), app.chunk_size, app.chunk_overlap)?;

    if app.store_path.exists() {
        store.load(&app.store_path)?;
        info!("loaded {} chunks from existing store", store.document_count());
    } else {
        retriever.build_from_directory(&app.docs_path, &app.store_path)?;
        info!("built store with {} chunks", store.document_count());
    }

    println!("问题: {}", query);
    let results = retriever.retrieve(&query, app.top_k)?;
    if results.is_empty() {
        println!("未找到相关文档。");
        return Ok(());
    }
    info!("retrieved {} relevant chunks", results.len());

    println!("\n回答:");
    answer_query(&llm, &query, &results).await;

    println!("\n参考来源:");
    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. [{}] (相似度: {:.2})\n   {}",
            i + 1,
            result.document.filename,
            result.score,
            truncate_text(&result.document.content, 100)
        );
    }

    Ok(())
}

/// Print the answer: streamed from Ollama when configured and reachable,
/// rule-based fallback otherwise.
async fn answer_query(llm: &LlmConfig, query: &str, results: &[SearchResult]) {
    if llm.mode != "local" {
        println!("{}", rule_based_answer(query, results));
        return;
    }

    let client = OllamaClient::new(llm.base_url.clone(), llm.model.clone());
    if let Err(e) = client.check_health().await {
        warn!("Ollama unavailable, falling back to rule-based answer: {}", e);
        println!("{}", rule_based_answer(query, results));
        return;
    }

    let options = GenerateOptions {
        temperature: llm.temperature,
        num_predict: Some(llm.max_tokens),
        ..GenerateOptions::default()
    };
    let generator = Generator::new(client, options);
    let mut printer = |token: &str| {
        print!("{}", token);
        let _ = std::io::stdout().flush();
    };
    match generator.generate_answer(query, results, Some(&mut printer)).await {
        Ok(_) => println!(),
        Err(e) => {
            warn!("generation failed, falling back to rule-based answer: {}", e);
            println!("{}", rule_based_answer(query, results));
        }
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  docsage docs \"<your question>\"");
    println!();
    println!("Example:");
    println!("  LLM_MODE=local OLLAMA_MODEL=qwen2.5:7b docsage docs \"退款流程是怎样的？\"");
    println!();
    println!("Environment:");
    println!("  DOCS_PATH          source document directory (default: docs)");
    println!("  VECTOR_STORE_PATH  persisted store file (default: data/vector_store.json)");
    println!("  CHUNK_SIZE         max chunk size in code points (default: 500)");
    println!("  CHUNK_OVERLAP      overlap budget in code points (default: 50)");
    println!("  TOP_K              results per query (default: 3)");
    println!("  EMBEDDING_DIM      embedding dimension (default: 300)");
    println!("  LLM_MODE           \"local\" uses Ollama, otherwise rule-based (default: local)");
    println!("  OLLAMA_MODEL       Ollama model name (default: qwen2.5:7b)");
    println!("  OLLAMA_BASE_URL    Ollama server URL (default: http://localhost:11434)");
}
