//! Output sinks for scrape records.

use std::io::Write;

use async_trait::async_trait;
use chorus_core::{Error, LyricsRecord};

/// Append-only destination for scrape records.
///
/// Records arrive in emission order; no durability acknowledgment is expected
/// from implementations.
#[async_trait]
pub trait RecordSink: Send {
    /// Append one record.
    async fn push(&mut self, record: LyricsRecord) -> Result<(), Error>;
}

/// Writes one JSON object per line, flushing after each record so consumers
/// see records as they are produced.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    async fn push(&mut self, record: LyricsRecord) -> Result<(), Error> {
        let line = serde_json::to_string(&record).map_err(|e| Error::Sink(e.to_string()))?;
        writeln!(self.writer, "{line}").map_err(|e| Error::Sink(e.to_string()))?;
        self.writer.flush().map_err(|e| Error::Sink(e.to_string()))
    }
}

/// Collects records in memory. Test helper.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<LyricsRecord>,
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn push(&mut self, record: LyricsRecord) -> Result<(), Error> {
        self.records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_lines_sink_one_line_per_record() {
        let mut sink = JsonLinesSink::new(Vec::new());

        sink.push(LyricsRecord::song("q", "Alpha", "Beta", "https://genius.com/beta-alpha-lyrics", "la".into()))
            .await
            .unwrap();
        sink.push(LyricsRecord::search_error("q", "https://genius.com/search?q=q", "boom".into()))
            .await
            .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: LyricsRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.song_title.as_deref(), Some("Alpha"));

        let second: LyricsRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.error.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::default();
        sink.push(LyricsRecord::search_error("a", "u", "1".into())).await.unwrap();
        sink.push(LyricsRecord::search_error("b", "u", "2".into())).await.unwrap();

        assert_eq!(sink.records.len(), 2);
        assert_eq!(sink.records[0].search_query, "a");
        assert_eq!(sink.records[1].search_query, "b");
    }
}
