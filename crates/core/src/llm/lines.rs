//! Line-oriented reading of streaming response bodies.
//!
//! Both streaming wire formats the adapters speak are line-delimited:
//! newline-delimited JSON from the local model server and `data:` events
//! from the hosted SSE endpoints. This reader turns a response byte
//! stream into complete lines, preserving arrival order and buffering at
//! most one partial line between reads.

use futures::stream::BoxStream;
use futures::StreamExt;

use super::error::GatewayError;

type ByteChunks = BoxStream<'static, Result<Vec<u8>, reqwest::Error>>;

pub(crate) struct LineReader {
    chunks: ByteChunks,
    buffer: Vec<u8>,
    exhausted: bool,
}

impl LineReader {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .boxed();
        Self::from_chunks(chunks)
    }

    fn from_chunks(chunks: ByteChunks) -> Self {
        Self {
            chunks,
            buffer: Vec::new(),
            exhausted: false,
        }
    }

    /// Next complete line without its terminator, or `None` at end of
    /// stream. A final unterminated line is returned before `None`.
    pub(crate) async fn next_line(&mut self) -> Result<Option<String>, GatewayError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
                let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
            }

            if self.exhausted {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let line = String::from_utf8_lossy(&self.buffer).into_owned();
                self.buffer.clear();
                return Ok(Some(line));
            }

            match self.chunks.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => return Err(GatewayError::Http(e.to_string())),
                None => self.exhausted = true,
            }
        }
    }
}
