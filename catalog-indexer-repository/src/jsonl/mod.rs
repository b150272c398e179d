//! JSON-lines implementation of the document sink.
//!
//! Each document becomes one JSON object on its own line, which is the
//! format bulk loaders of most search engines accept directly.

use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::errors::SinkError;
use crate::interfaces::DocumentSink;
use catalog_indexer_shared::Document;

/// Writes documents as JSON lines to any async writer.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    async fn write_bytes(&self, bytes: &[u8]) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().await;
        writer.write_all(bytes).await?;
        writer.flush().await?;
        Ok(())
    }
}

impl JsonLinesSink<tokio::io::Stdout> {
    /// A sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl JsonLinesSink<tokio::fs::File> {
    /// A sink writing to a newly created (or truncated) file.
    pub async fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = tokio::fs::File::create(path).await?;
        info!(path = %path.display(), "Writing documents to file");
        Ok(Self::new(file))
    }
}

fn encode_line(document: &Document, buffer: &mut Vec<u8>) -> Result<(), SinkError> {
    serde_json::to_writer(&mut *buffer, document)?;
    buffer.push(b'\n');
    Ok(())
}

#[async_trait]
impl<W> DocumentSink for JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write(&self, document: &Document) -> Result<(), SinkError> {
        let mut line = Vec::new();
        encode_line(document, &mut line)?;
        self.write_bytes(&line).await
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_write(&self, documents: &[Document]) -> Result<(), SinkError> {
        // Encode everything up front so a bad document leaves no partial batch.
        let mut buffer = Vec::new();
        for document in documents {
            encode_line(document, &mut buffer)
                .map_err(|e| SinkError::bulk_write(format!("{:?}: {}", document.id(), e)))?;
        }

        self.write_bytes(&buffer).await?;
        debug!("Wrote document batch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(id: &str) -> Document {
        let mut doc = Document::new();
        doc.add_field("productId", id);
        doc.add_field("cat", "0/a");
        doc.add_field("cat", "1/a/b");
        doc
    }

    fn lines(sink: JsonLinesSink<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = sink.into_inner();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_write_single_document() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.write(&document("P1")).await.unwrap();

        let lines = lines(sink);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["fields"]["productId"][0], "P1");
        assert_eq!(lines[0]["fields"]["cat"][1], "1/a/b");
        assert!(lines[0]["indexedAt"].is_string());
    }

    #[tokio::test]
    async fn test_bulk_write_one_line_per_document() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.bulk_write(&[document("P1"), document("P2"), document("P3")])
            .await
            .unwrap();

        let ids: Vec<_> = lines(sink)
            .iter()
            .map(|l| l["fields"]["productId"][0].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
    }

    #[tokio::test]
    async fn test_bulk_write_empty_batch() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.bulk_write(&[]).await.unwrap();
        assert!(sink.into_inner().is_empty());
    }
}
