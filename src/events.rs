//! Pipeline events and their server-sent-event framing.

use std::io::Write;

use serde::Serialize;
use tracing::warn;

use crate::pipeline::Comparison;
use crate::traits::EventSink;

pub const ROUTE_STATUS_MESSAGE: &str = "Computing routes...";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Text generated by the optimizer so far.
    Token { text: String },
    /// Generation finished; route computation is starting.
    Status { message: String },
    Result { data: Box<Comparison> },
    Error { message: String },
}

impl PipelineEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineEvent::Result { .. } | PipelineEvent::Error { .. })
    }

    /// Encodes the event as one `data: <json>` frame.
    pub fn to_sse_frame(&self) -> String {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialise event");
                serde_json::json!({"type": "error", "message": err.to_string()}).to_string()
            }
        };
        format!("data: {}\n\n", json)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: PipelineEvent) {}
}

impl EventSink for Vec<PipelineEvent> {
    fn emit(&mut self, event: PipelineEvent) {
        self.push(event);
    }
}

/// Writes each event as an SSE frame, flushing after every frame.
#[derive(Debug)]
pub struct SseWriter<W: Write> {
    writer: W,
    failed: bool,
}

impl<W: Write> SseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for SseWriter<W> {
    fn emit(&mut self, event: PipelineEvent) {
        // A disconnected client stops receiving; the pipeline still runs to completion.
        if self.failed {
            return;
        }
        let frame = event.to_sse_frame();
        if let Err(err) = self
            .writer
            .write_all(frame.as_bytes())
            .and_then(|_| self.writer.flush())
        {
            warn!(error = %err, "event stream closed");
            self.failed = true;
        }
    }
}
