//! Coaching response generation
//!
//! Three strategies, attempted in order and tagged in the result:
//! the generative backend when it is configured, a deterministic canned
//! list when the backend errors mid-call, and the template buckets when no
//! backend is configured at all. Generation itself never fails; the caller
//! always gets a non-empty coaching utterance.

use std::sync::Arc;

use domain::{Analysis, Intent, ResponseSource};
use tracing::{debug, instrument, warn};

use crate::ports::{CoachingContext, CoachingPort};
use crate::services::classifier;

/// Age band index for template selection: shorter responses for younger
/// children.
const fn template_band(age_months: u32) -> usize {
    if age_months < 19 {
        0
    } else if age_months < 37 {
        1
    } else {
        2
    }
}

/// Template buckets keyed by (intent, age band); `{word}` is replaced with
/// the most salient recognized word.
const TEMPLATES: [(Intent, [&str; 3]); 8] = [
    (
        Intent::ItemRequest,
        [
            "{word}? 자, {word}!",
            "{word} 원하는구나! 엄마가 {word} 줄게!",
            "{word} 갖고 싶구나! 엄마가 {word} 준비해줄게. 어떤 게 좋아?",
        ],
    ),
    (
        Intent::PersonCalling,
        [
            "{word} 여기 있어!",
            "{word} 불렀구나! {word} 여기 있어!",
            "{word} 부르는 소리 들었어! 여기 있어. 무엇을 도와줄까?",
        ],
    ),
    (
        Intent::VocalPlay,
        [
            "{word}! {word}!",
            "우와, {word}! 재미있는 소리야!",
            "{word} 소리를 잘 내는구나! 또 다른 소리도 해볼까?",
        ],
    ),
    (
        Intent::EmotionExpression,
        [
            "그렇구나~",
            "{word}한 기분이구나! 엄마도 알아.",
            "{word}한 기분이구나! 어떤 일이 있었는지 더 이야기해줄래?",
        ],
    ),
    (
        Intent::PlayRequest,
        [
            "같이 놀자!",
            "좋아, 같이 놀자! 뭐 하고 놀까?",
            "재미있는 놀이 시간이야! 블록 쌓기 할까, 책 읽기 할까?",
        ],
    ),
    (
        Intent::Negation,
        [
            "그렇구나, 알았어.",
            "싫구나, 알았어. 그만할게.",
            "싫다고 말해줘서 고마워. 그럼 어떻게 하면 좋을까?",
        ],
    ),
    (
        Intent::Question,
        [
            "궁금하구나!",
            "궁금한 게 있구나! 같이 알아보자.",
            "좋은 질문이야! 엄마가 알려줄게. 또 궁금한 게 있어?",
        ],
    ),
    (
        Intent::HelpRequest,
        [
            "엄마가 도와줄게!",
            "도움이 필요하구나! 엄마가 도와줄게.",
            "어려운 일이 있구나! 엄마가 같이 해줄게. 어떤 걸 도와줄까?",
        ],
    ),
];

/// Canned per-intent fallback lists, used when the generative backend
/// errors; `{transcript}` is replaced with what the child said.
const CANNED: [(Intent, [&str; 3]); 8] = [
    (
        Intent::ItemRequest,
        [
            "우리 아가, {transcript} 원하는구나! 엄마가 준비해줄게. 맛있게 먹을까?",
            "와, {transcript} 주세요? 엄마가 줄게! 어떤 게 더 좋아?",
            "좋아! {transcript} 갖고 싶구나. 엄마가 가져다줄게!",
        ],
    ),
    (
        Intent::PersonCalling,
        [
            "우리 아가, {transcript} 여기 있어! 반가워. 뭐 하고 싶어?",
            "와, {transcript} 불렀네! 엄마가 왔어. 무슨 일이야?",
            "여기 있어! {transcript} 왔어. 같이 놀까?",
        ],
    ),
    (
        Intent::VocalPlay,
        [
            "우와, {transcript}! 정말 재미있는 소리야! 또 해볼까?",
            "{transcript}! 엄마도 따라해볼게. {transcript}!",
            "멋진 소리야! {transcript} 하는 소리가 정말 귀여워!",
        ],
    ),
    (
        Intent::EmotionExpression,
        [
            "우리 아가, {transcript}한 기분이구나! 엄마도 그런 기분 알아. 더 이야기해볼까?",
            "기분이 {transcript}하구나. 엄마가 들어줄게. 어떤 일이 있었어?",
            "우와, {transcript}한 기분이네! 더 자세히 말해줄래?",
        ],
    ),
    (
        Intent::PlayRequest,
        [
            "우와, 좋아! 같이 놀자! 블록으로 탑 쌓을까, 그림 그릴까?",
            "놀이 시간이네! 어떤 놀이가 좋아? 책 읽기? 춤추기?",
            "재미있는 놀이를 해볼까? 뭐 하고 싶어? 엄마랑 같이 하자!",
        ],
    ),
    (
        Intent::Negation,
        [
            "우리 아가, {transcript}라고 하는구나. 엄마가 들어줄게. 왜 그런 기분이야?",
            "그렇구나, {transcript}한 기분이구나. 엄마가 도와줄게. 어떻게 해주면 좋을까?",
            "알겠어, {transcript}하는구나. 엄마가 함께 있어줄게.",
        ],
    ),
    (
        Intent::Question,
        [
            "우리 아가, 궁금한 게 있구나! 좋은 질문이야. 엄마가 알려줄게!",
            "어떤 걸 궁금해해? 엄마가 설명해줄게.",
            "좋은 질문이네! 엄마가 답해줄게. 더 궁금한 게 있어?",
        ],
    ),
    (
        Intent::HelpRequest,
        [
            "우리 아가, 도움이 필요하구나! 엄마가 도와줄게. 어떻게 해주면 좋을까?",
            "어려운 일이 있구나. 엄마가 함께 해줄게. 걱정하지 마!",
            "힘들구나. 엄마가 도와줄게. 어떤 걸 도와주면 좋을까?",
        ],
    ),
];

/// A coaching utterance tagged with the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedResponse {
    /// Non-empty coaching text
    pub text: String,
    /// Strategy that produced the text
    pub source: ResponseSource,
}

/// Coaching response generator
pub struct ResponseGenerator {
    coaching: Arc<dyn CoachingPort>,
}

impl std::fmt::Debug for ResponseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseGenerator").finish_non_exhaustive()
    }
}

impl ResponseGenerator {
    /// Create a generator backed by the given coaching port
    #[must_use]
    pub fn new(coaching: Arc<dyn CoachingPort>) -> Self {
        Self { coaching }
    }

    /// Produce a coaching response for one analyzed transcript.
    ///
    /// Infallible: every path ends in a non-empty utterance.
    #[instrument(skip(self, transcript), fields(intent = %analysis.intent, age_months))]
    pub async fn generate(
        &self,
        transcript: &str,
        analysis: &Analysis,
        age_months: u32,
    ) -> GeneratedResponse {
        if !self.coaching.is_available() {
            debug!("Generative backend not configured, using template strategy");
            return Self::from_template(transcript, analysis, age_months);
        }

        let context = CoachingContext {
            age_months,
            transcript: transcript.to_string(),
            intent: analysis.intent,
            stage: analysis.stage,
        };

        match self.coaching.coach(&context).await {
            Ok(text) if !text.trim().is_empty() => GeneratedResponse {
                text: text.trim().to_string(),
                source: ResponseSource::Generative,
            },
            Ok(_) => {
                warn!("Generative backend returned empty text, using canned fallback");
                Self::from_canned(transcript, analysis.intent)
            },
            Err(err) => {
                warn!(error = %err, "Generative backend failed, using canned fallback");
                Self::from_canned(transcript, analysis.intent)
            },
        }
    }

    /// Deterministic template strategy
    fn from_template(transcript: &str, analysis: &Analysis, age_months: u32) -> GeneratedResponse {
        let word = classifier::salient_word(transcript, analysis.intent);
        let band = template_band(age_months);
        let template = TEMPLATES
            .iter()
            .find(|(intent, _)| *intent == analysis.intent)
            .map_or("정말 잘 말했어!", |(_, bucket)| bucket[band]);

        GeneratedResponse {
            text: template.replace("{word}", word),
            source: ResponseSource::Template,
        }
    }

    /// Canned fallback, chosen by a stable hash of the transcript so
    /// repeated runs pick the same line.
    fn from_canned(transcript: &str, intent: Intent) -> GeneratedResponse {
        let lines = CANNED
            .iter()
            .find(|(candidate, _)| *candidate == intent)
            .map_or(
                &[
                    "우와, 정말 좋은 말이야! 더 이야기해볼까?",
                    "멋진 말이야! 말하는 소리가 정말 귀여워!",
                    "좋아! 엄마가 들어줄게!",
                ],
                |(_, lines)| lines,
            );

        let seed = blake3::hash(transcript.as_bytes());
        let index = usize::from(seed.as_bytes()[0]) % lines.len();

        GeneratedResponse {
            text: lines[index].replace("{transcript}", transcript),
            source: ResponseSource::Canned,
        }
    }
}
