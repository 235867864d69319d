use serde::Serialize;
use std::thread;
use std::time::{Duration, Instant};
use utoipa::ToSchema;

/// Identifier reported with every prediction. No model is loaded.
pub const MODEL_NAME: &str = "demo-vgg16-emulator";

/// Declared upload types accepted by the classifier.
pub const SUPPORTED_CONTENT_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/webp"];

const SIZE_MODULUS: u64 = 100_000;
const MIN_CONFIDENCE: f64 = 0.65;
const CONFIDENCE_SPAN: f64 = 0.34;
const BASE_LATENCY_MS: u64 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Label {
    #[serde(rename = "Malaria Detected")]
    Detected,
    #[serde(rename = "No Malaria Detected")]
    NotDetected,
}

impl Label {
    /// Even sizes are reported as detections, odd sizes as clear.
    pub fn for_size(file_size: u64) -> Self {
        if file_size % 2 == 0 { Label::Detected } else { Label::NotDetected }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Prediction {
    pub label: Label,
    /// Rounded to three decimals
    pub confidence: f64,
    pub processing_ms: u64,
    pub file_size: u64,
    #[schema(value_type = String, example = "demo-vgg16-emulator")]
    pub model: &'static str,
}

/// Checks a declared content type against the allow-set, verbatim.
pub fn accepts(content_type: &str) -> bool {
    SUPPORTED_CONTENT_TYPES.contains(&content_type)
}

/// `round(0.65 + 0.34 * ((n mod 100000) / 100000), 3)`
pub fn confidence_for(file_size: u64) -> f64 {
    let base = (file_size % SIZE_MODULUS) as f64 / SIZE_MODULUS as f64;
    let confidence = MIN_CONFIDENCE + CONFIDENCE_SPAN * base;
    round_to_thousandths(confidence)
}

/// Rounds the exact binary value, ties to even. Scaling by 1000 first would
/// round an already-inexact product and push values like 0.6584999.. up to 0.659.
fn round_to_thousandths(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

pub fn simulated_latency(file_size: u64) -> Duration {
    Duration::from_millis(BASE_LATENCY_MS + file_size % 100)
}

/// Runs the mock inference over an already-read upload.
///
/// Blocks the calling thread for [`simulated_latency`], so call it from the
/// blocking pool. `started` marks the moment the upload began to be read;
/// `processing_ms` covers everything from there to the end of the delay.
pub fn classify(content: &[u8], started: Instant) -> Prediction {
    let file_size = content.len() as u64;
    let confidence = confidence_for(file_size);
    let label = Label::for_size(file_size);

    thread::sleep(simulated_latency(file_size));

    Prediction {
        label,
        confidence,
        processing_ms: started.elapsed().as_millis() as u64,
        file_size,
        model: MODEL_NAME,
    }
}
