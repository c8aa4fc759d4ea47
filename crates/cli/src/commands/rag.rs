//! RAG search commands.

use std::path::Path;

use nexus_shop_client::api::RagFilters;
use serde_json::Value;
use tracing::info;

use super::{CommandError, Context};

/// Semantic search.
pub async fn query(ctx: &Context, query: &str, top_k: Option<u32>) -> Result<(), CommandError> {
    let answer = ctx.client.rag_query(query, top_k).await?;
    print_answer(&answer.answer, answer.sources.len());
    for source in &answer.sources {
        info!("  [{:.2}] {} - {}", source.score, source.id, source.title);
    }
    Ok(())
}

/// Semantic search with metadata filters.
pub async fn hybrid(
    ctx: &Context,
    query: &str,
    language: Option<String>,
    year_min: Option<i32>,
    year_max: Option<i32>,
    top_k: Option<u32>,
) -> Result<(), CommandError> {
    let filters = RagFilters {
        language,
        year_min,
        year_max,
    };
    let answer = ctx.client.rag_hybrid_query(query, &filters, top_k).await?;
    print_answer(&answer.answer, answer.sources.len());
    for source in &answer.sources {
        info!("  [{:.2}] {} - {}", source.score, source.id, source.title);
    }
    Ok(())
}

/// Find products visually similar to a local image.
pub async fn multimodal(ctx: &Context, file: &Path) -> Result<(), CommandError> {
    let (name, bytes) = read_file(file)?;
    let hits = ctx.client.rag_search_multimodal(&name, bytes).await?;

    info!("{} similar products", hits.len());
    for hit in &hits {
        match hit.product_id {
            Some(product) => info!("  [{:.2}] {} (product #{product})", hit.score, hit.title),
            None => info!("  [{:.2}] {}", hit.score, hit.title),
        }
    }
    Ok(())
}

/// Ingest a document into the index.
pub async fn ingest_document(
    ctx: &Context,
    file: &Path,
    metadata: Option<&str>,
) -> Result<(), CommandError> {
    let (name, bytes) = read_file(file)?;
    let metadata = parse_metadata(metadata)?;
    ctx.client
        .rag_ingest_document(&name, bytes, metadata.as_ref())
        .await?;
    info!("Ingested document {name}");
    Ok(())
}

/// Ingest an image into the index.
pub async fn ingest_image(
    ctx: &Context,
    file: &Path,
    metadata: Option<&str>,
) -> Result<(), CommandError> {
    let (name, bytes) = read_file(file)?;
    let metadata = parse_metadata(metadata)?;
    ctx.client
        .rag_ingest_image(&name, bytes, metadata.as_ref())
        .await?;
    info!("Ingested image {name}");
    Ok(())
}

fn print_answer(answer: &str, sources: usize) {
    for paragraph in answer.split('\n').filter(|p| !p.is_empty()) {
        info!("{paragraph}");
    }
    info!("({sources} sources)");
}

fn read_file(file: &Path) -> Result<(String, Vec<u8>), CommandError> {
    let bytes = std::fs::read(file).map_err(|source| CommandError::ReadFile {
        path: file.display().to_string(),
        source,
    })?;
    let name = file
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    Ok((name, bytes))
}

fn parse_metadata(metadata: Option<&str>) -> Result<Option<Value>, CommandError> {
    metadata
        .map(serde_json::from_str)
        .transpose()
        .map_err(CommandError::from)
}
