//! In-memory similarity index over the template library.
//!
//! Built once at startup from (title, text) pairs and passed by reference
//! into the pipeline — no ambient global state. Exposes a single operation:
//! nearest-match over cosine similarity.

use std::path::Path;

use super::embedder::EmbeddingModel;
use super::IndexError;
use crate::document::read_document_text;

/// A template stored in the index. Immutable once indexed.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    pub title: String,
    pub text: String,
    embedding: Vec<f32>,
}

/// One ranked nearest-match result.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityHit {
    pub title: String,
    pub score: f32,
}

#[derive(Debug, Default)]
pub struct TemplateIndex {
    entries: Vec<TemplateEntry>,
}

impl TemplateIndex {
    /// Build the index from (title, text) pairs.
    pub fn build(
        pairs: Vec<(String, String)>,
        embedder: &dyn EmbeddingModel,
    ) -> Result<Self, IndexError> {
        let texts: Vec<&str> = pairs.iter().map(|(_, text)| text.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts)?;

        let entries = pairs
            .into_iter()
            .zip(embeddings)
            .map(|((title, text), embedding)| TemplateEntry {
                title,
                text,
                embedding,
            })
            .collect();

        Ok(Self { entries })
    }

    /// Build the index from a directory of template documents.
    ///
    /// Each readable `.docx`/`.txt` file becomes one entry whose title is the
    /// file name. Files are indexed in sorted name order so equal-score ties
    /// resolve deterministically. Unreadable files are logged and skipped.
    pub fn build_from_dir(
        dir: &Path,
        embedder: &dyn EmbeddingModel,
    ) -> Result<Self, IndexError> {
        let mut names: Vec<String> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();

        let mut pairs = Vec::new();
        for name in names {
            let path = dir.join(&name);
            match read_document_text(&path) {
                Ok(text) => pairs.push((name, text)),
                Err(e) => {
                    tracing::warn!(template = %name, error = %e, "Skipping unreadable template");
                }
            }
        }

        if pairs.is_empty() {
            return Err(IndexError::EmptyLibrary(dir.display().to_string()));
        }

        tracing::info!(templates = pairs.len(), dir = %dir.display(), "Building template index");
        Self::build(pairs, embedder)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` templates nearest to `text` by cosine similarity, best first.
    ///
    /// Ties keep index insertion order (stable sort). An empty index yields
    /// an empty list.
    pub fn nearest(
        &self,
        text: &str,
        k: usize,
        embedder: &dyn EmbeddingModel,
    ) -> Result<Vec<SimilarityHit>, IndexError> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query = embedder.embed(text)?;

        let mut hits: Vec<SimilarityHit> = self
            .entries
            .iter()
            .map(|entry| SimilarityHit {
                title: entry.title.clone(),
                score: cosine_similarity(&query, &entry.embedding),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
