use rand::seq::SliceRandom;

use crate::extractor::ExtractionResult;

/// ---------------------------------------------------------------------------
/// Responder Seam
/// ---------------------------------------------------------------------------

/// Produces the assistant's chat reply for a message once extraction has
/// run. Swappable so tests can pin the wording.
pub trait Responder: Send + Sync {
  fn reply(&self, message: &str, extraction: &ExtractionResult) -> String;
}

/// Acknowledgment lines the default responder picks from.
const CANNED_ACKS: [&str; 5] = [
  "Got it! I've updated your day.",
  "Nice, logged that for you.",
  "Thanks for the update, your log is current.",
  "Noted. I've captured that.",
  "All set, your day is up to date.",
];

/// Shared reply layout: acknowledgment line, then insight bullets, then any
/// surfaced tasks.
fn compose(ack: &str, extraction: &ExtractionResult) -> String {
  let mut reply = ack.to_string();

  if !extraction.insights.is_empty() {
    reply.push('\n');
    for insight in &extraction.insights {
      reply.push_str(&format!("\n- {insight}"));
    }
  }

  if !extraction.tasks.is_empty() {
    reply.push_str("\n\nTasks spotted:");
    for task in &extraction.tasks {
      reply.push_str(&format!("\n- [{}] {}", task.category, task.text));
    }
  }

  reply
}

/// ---------------------------------------------------------------------------
/// Implementations
/// ---------------------------------------------------------------------------

/// Default responder: uniform random acknowledgment over a fixed pool.
#[derive(Debug, Default)]
pub struct CannedResponder;

impl Responder for CannedResponder {
  fn reply(&self, _message: &str, extraction: &ExtractionResult) -> String {
    let mut rng = rand::thread_rng();
    // The pool is non-empty, so choose can only return Some.
    let ack = CANNED_ACKS.choose(&mut rng).copied().unwrap_or(CANNED_ACKS[0]);
    compose(ack, extraction)
  }
}

/// Deterministic responder with a fixed acknowledgment. Used where stable
/// output matters, e.g. scripted runs and assertions.
#[derive(Debug, Default)]
pub struct TemplateResponder;

impl Responder for TemplateResponder {
  fn reply(&self, _message: &str, extraction: &ExtractionResult) -> String {
    compose("Logged.", extraction)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
