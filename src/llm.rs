//! Language-model optimizer: prompt construction, output parsing and the
//! hosted Messages API adapter.

use std::fmt::Write as _;
use std::io::{BufRead, BufReader};

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::CompletionError;
use crate::model::{OptimizationResult, Ride, Vehicle};
use crate::traits::CompletionProvider;

const API_VERSION: &str = "2023-06-01";

pub fn build_prompt(rides: &[Ride], vehicles: &[Vehicle]) -> String {
    let mut rides_desc = String::new();
    for r in rides {
        let pickup = label_or_coords(&r.pickup_label, r.pickup_lat, r.pickup_lng);
        let dropoff = label_or_coords(&r.dropoff_label, r.dropoff_lat, r.dropoff_lng);
        let _ = write!(
            rides_desc,
            "  - {}: pickup={} -> dropoff={}, passengers={}, luggage={}, priority={}, \
             service={}, window={} to {}",
            r.id,
            pickup,
            dropoff,
            r.passenger_count,
            r.luggage_count,
            r.priority.as_str(),
            r.service_type.as_str(),
            r.time_window_start,
            r.time_window_end,
        );
        if !r.notes.is_empty() {
            let _ = write!(rides_desc, ", notes: {}", r.notes);
        }
        rides_desc.push('\n');
    }

    let mut vehicles_desc = String::new();
    for v in vehicles {
        let _ = writeln!(
            vehicles_desc,
            "  - {} ({}): at ({}, {}), capacity={}, luggage_capacity={}, type={}, status={}",
            v.id,
            v.name,
            v.current_lat,
            v.current_lng,
            v.capacity,
            v.luggage_capacity,
            v.vehicle_type.as_str(),
            v.status.as_str(),
        );
    }

    format!(
        r#"You are a fleet dispatch optimizer for a Portland, OR ground transportation company.

Given the following ride requests and vehicles, create optimal route assignments.

RIDES:
{rides_desc}
VEHICLES:
{vehicles_desc}
CONSTRAINTS:
- Only vehicles with status=available may be assigned rides
- A vehicle cannot exceed its passenger capacity for any single ride
- A vehicle cannot exceed its luggage capacity for any single ride
- Within a vehicle's sequence, serve higher priority rides first (urgent > high > medium > low)
- Respect time windows and minimize total travel distance
- A vehicle can handle multiple rides if sequenced efficiently (dropoff of one ride near pickup of the next)
- Consider geographic clustering: assign nearby rides to the same vehicle

Respond with ONLY valid JSON in this exact format:
{{
  "assignments": [
    {{
      "vehicle_id": "V001",
      "ride_ids_in_order": ["R001", "R005"],
      "reasoning": "Brief explanation of why these rides are grouped and ordered this way"
    }}
  ],
  "overall_strategy": "2-3 sentence summary of your optimization approach",
  "unassigned_rides": ["R999"]
}}

Every ride should be assigned if possible."#
    )
}

fn label_or_coords(label: &str, lat: f64, lng: f64) -> String {
    if label.is_empty() {
        format!("{},{}", lat, lng)
    } else {
        label.to_string()
    }
}

/// Removes a surrounding markdown code fence, if any.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Drop the opening fence line, language tag included.
    let body = match trimmed.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

pub fn parse_optimization(raw: &str) -> Result<OptimizationResult, serde_json::Error> {
    serde_json::from_str(strip_code_fence(raw))
}

/// [`CompletionProvider`] backed by the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    config: LlmConfig,
    client: reqwest::blocking::Client,
}

impl AnthropicClient {
    pub fn new(config: LlmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn send(&self, prompt: &str) -> Result<reqwest::blocking::Response, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "stream": self.config.stream,
            "messages": [{"role": "user", "content": prompt}],
        });
        debug!(%url, model = %self.config.model, stream = self.config.stream, "requesting completion");

        let response = self
            .client
            .post(url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl CompletionProvider for AnthropicClient {
    fn complete(
        &self,
        prompt: &str,
        on_text: &mut dyn FnMut(&str),
    ) -> Result<String, CompletionError> {
        let response = self.send(prompt)?;

        let text = if self.config.stream {
            read_event_stream(BufReader::new(response), on_text)?
        } else {
            let message: MessageResponse = response.json()?;
            let text: String = message
                .content
                .into_iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text),
                    ContentBlock::Other => None,
                })
                .collect();
            on_text(&text);
            text
        };

        if text.trim().is_empty() {
            return Err(CompletionError::Empty);
        }
        Ok(text)
    }
}

/// Collects text deltas from a Messages API event stream.
fn read_event_stream<R: BufRead>(
    reader: R,
    on_text: &mut dyn FnMut(&str),
) -> Result<String, CompletionError> {
    let mut text = String::new();

    for line in reader.lines() {
        let line = line?;
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        // Event kinds this client does not model are ignored.
        let Ok(event) = serde_json::from_str::<StreamEvent>(data.trim()) else {
            continue;
        };

        match event {
            StreamEvent::ContentBlockDelta {
                delta: Delta::TextDelta { text: chunk },
            } => {
                on_text(&chunk);
                text.push_str(&chunk);
            }
            StreamEvent::Error { error } => return Err(CompletionError::Stream(error.message)),
            StreamEvent::MessageStop => break,
            _ => {}
        }
    }

    Ok(text)
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamEvent {
    ContentBlockDelta {
        delta: Delta,
    },
    MessageStop,
    Error {
        error: StreamErrorBody,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Delta {
    TextDelta {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct StreamErrorBody {
    message: String,
}
