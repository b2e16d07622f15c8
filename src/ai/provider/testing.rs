//! Scripted provider for unit tests
//!
//! Answers per image URL from a script. Records call counts, the peak number
//! of in-flight requests and when each call started and finished.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use super::{VisionProvider, VisionResponse};
use crate::types::{ErrorCategory, ProviderError};

#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    /// Reply with this raw text
    Reply(String),
    /// Fail with a classified provider error
    Fail(ErrorCategory),
    /// Wait, then behave like the inner script
    Slow(Duration, Box<Scripted>),
    /// Fail transiently this many times, then behave like the inner script
    FlakyThen(usize, Box<Scripted>),
}

impl Scripted {
    pub(crate) fn reply(content: impl Into<String>) -> Self {
        Scripted::Reply(content.into())
    }

    pub(crate) fn slow(self, delay: Duration) -> Self {
        Scripted::Slow(delay, Box::new(self))
    }
}

/// One provider call as seen on the tokio clock
#[derive(Debug, Clone)]
pub(crate) struct CallSpan {
    pub(crate) url: String,
    pub(crate) started: Instant,
    pub(crate) finished: Instant,
}

pub(crate) struct ScriptedProvider {
    scripts: HashMap<String, Scripted>,
    default: Scripted,
    attempts: Mutex<HashMap<String, usize>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    spans: Mutex<Vec<CallSpan>>,
}

impl ScriptedProvider {
    /// Every URL without its own script gets `default`
    pub(crate) fn new(default: Scripted) -> Self {
        Self {
            scripts: HashMap::new(),
            default,
            attempts: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            spans: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn always_failing() -> Self {
        Self::new(Scripted::Fail(ErrorCategory::Unknown))
    }

    pub(crate) fn with_script(mut self, url: &str, script: Scripted) -> Self {
        self.scripts.insert(url.to_string(), script);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Finished calls, in completion order
    pub(crate) fn spans(&self) -> Vec<CallSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn attempt_number(&self, url: &str) -> usize {
        let mut attempts = self.attempts.lock().unwrap();
        let count = attempts.entry(url.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    async fn run(&self, script: &Scripted, url: &str) -> Result<VisionResponse, ProviderError> {
        let mut script = script;
        loop {
            match script {
                Scripted::Reply(content) => {
                    return Ok(VisionResponse::content_only(content.clone()));
                }
                Scripted::Fail(category) => {
                    return Err(ProviderError::with_provider(
                        *category,
                        format!("scripted failure for {}", url),
                        "scripted",
                    ));
                }
                Scripted::Slow(delay, inner) => {
                    tokio::time::sleep(*delay).await;
                    script = &**inner;
                }
                Scripted::FlakyThen(failures, inner) => {
                    if self.attempt_number(url) <= *failures {
                        return Err(ProviderError::with_provider(
                            ErrorCategory::Transient,
                            "scripted transient failure",
                            "scripted",
                        ));
                    }
                    script = &**inner;
                }
            }
        }
    }
}

#[async_trait]
impl VisionProvider for ScriptedProvider {
    async fn analyze_image(
        &self,
        _prompt: &str,
        image_url: &str,
    ) -> Result<VisionResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let started = Instant::now();

        let script = self.scripts.get(image_url).unwrap_or(&self.default);
        let result = self.run(script, image_url).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.spans.lock().unwrap().push(CallSpan {
            url: image_url.to_string(),
            started,
            finished: Instant::now(),
        });
        result
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

/// Provider JSON for a photo with the given scores
pub(crate) fn photo_json(
    overall: Option<u8>,
    hero_potential: u8,
    impacts: &[f64],
    enhancement_potential: u8,
) -> String {
    let recommendations: Vec<serde_json::Value> = impacts
        .iter()
        .enumerate()
        .map(|(i, impact)| {
            serde_json::json!({
                "toolId": "hdr-enhancement",
                "toolName": "HDR Enhancement",
                "priority": i + 1,
                "impactEstimate": impact,
                "impactDescription": format!("+{}%", impact),
                "reason": "Dark interior"
            })
        })
        .collect();

    let mut value = serde_json::json!({
        "lightingScore": 70,
        "compositionScore": 70,
        "clarityScore": 70,
        "appealScore": 70,
        "roomType": "living-room",
        "isExterior": false,
        "heroPotential": hero_potential,
        "recommendations": recommendations,
        "enhancementPotential": enhancement_potential,
        "aiFeedback": "Bright and well framed"
    });
    if let Some(overall) = overall {
        value["overallScore"] = serde_json::json!(overall);
    }
    value.to_string()
}
