//! Keyword-driven utterance classifier
//!
//! Maps a transcript plus the child's age to intent, developmental stage,
//! emotion and an age-appropriateness flag. Everything here is a pure
//! function over fixed lookup tables; no I/O, no state.

use domain::{Analysis, DevelopmentalStage, Emotion, Intent};

/// Minimum keyword score required before an intent match counts.
///
/// Below this the age-banded default intent applies.
const INTENT_SCORE_THRESHOLD: f32 = 0.5;

/// Keyword table per intent, iterated in [`Intent::ALL`] order.
///
/// Toddler-register Korean: canonical words plus the doubled forms young
/// children actually produce ("물물", "까까"). A containment match scores 1;
/// keywords longer than two characters score an extra 0.5, biasing ties
/// toward longer, more specific matches.
const INTENT_KEYWORDS: [(Intent, &[&str]); 8] = [
    (
        Intent::ItemRequest,
        &[
            "까까", "물", "우유", "밥", "과자", "장난감", "주세요", "줘", "먹어", "마셔", "맘마",
            "음식", "간식", "물물", "과과",
        ],
    ),
    (
        Intent::PersonCalling,
        &[
            "엄마", "아빠", "할머니", "할아버지", "언니", "오빠", "누나", "형", "맘마", "아빠빠",
        ],
    ),
    (
        Intent::VocalPlay,
        &[
            "바바바", "다다다", "가가가", "라라라", "마마마", "나나나", "바바", "다다", "가가",
            "라라", "마마", "나나", "아아", "어어", "오오",
        ],
    ),
    (
        Intent::EmotionExpression,
        &[
            "좋아", "싫어", "기뻐", "속상해", "무서워", "재미있어", "아파", "웃어", "하하", "우와",
            "와", "오", "아이", "예예", "노노",
        ],
    ),
    (
        Intent::PlayRequest,
        &[
            "놀아", "같이", "더", "놀이", "게임", "책", "그림", "춤", "놀자", "같이놀자", "더놀자",
            "책책", "그림그림", "춤춤",
        ],
    ),
    (
        Intent::Negation,
        &[
            "안", "싫어", "하지마", "그만", "싫어해", "안돼", "노노", "싫싫", "안안", "그만그만",
        ],
    ),
    (
        Intent::Question,
        &[
            "뭐", "어디", "언제", "왜", "누구", "어떻게", "몇", "뭐뭐", "어디어디", "왜왜",
            "누구누구",
        ],
    ),
    (
        Intent::HelpRequest,
        &[
            "도와", "해줘", "못해", "어려워", "힘들어", "도와줘", "해줘해줘", "못해못해",
            "어려워어려워",
        ],
    ),
];

/// Emotion keyword table, checked top to bottom; the first containment wins.
const EMOTION_KEYWORDS: [(Emotion, &[&str]); 6] = [
    (
        Emotion::Joy,
        &[
            "좋아", "기뻐", "재미있어", "웃어", "하하", "우와", "와", "오", "예예", "하하하",
            "기쁘다", "좋다",
        ],
    ),
    (
        Emotion::Sadness,
        &[
            "울어", "슬퍼", "아파", "속상해", "우우", "아이", "슬프다", "아프다", "속상하다",
        ],
    ),
    (
        Emotion::Anger,
        &[
            "짜증", "화나", "싫어", "안돼", "노노", "싫싫", "안안", "짜증나", "화나다",
        ],
    ),
    (
        Emotion::Fear,
        &[
            "무서워", "겁나", "무서워해", "무서무서", "겁겁", "무섭다", "겁난다",
        ],
    ),
    (
        Emotion::Curiosity,
        &[
            "뭐", "어디", "왜", "어떻게", "궁금", "뭐뭐", "어디어디", "왜왜", "궁금하다", "뭐지",
        ],
    ),
    (
        Emotion::Anxiety,
        &[
            "도와", "어려워", "힘들어", "못해", "도와줘", "어려워어려워", "힘들어힘들어",
            "못해못해",
        ],
    ),
];

/// Word-count band (min_age, max_age_exclusive, min_words, max_words).
///
/// An utterance is age-appropriate iff its whitespace word count falls
/// inside the band for the child's age. Ages at or above 48 months have no
/// band and classify as not appropriate.
const AGE_WORD_BANDS: [(u32, u32, usize, usize); 6] = [
    (0, 12, 0, 1),
    (12, 18, 0, 2),
    (18, 24, 1, 3),
    (24, 30, 2, 4),
    (30, 36, 3, 6),
    (36, 48, 4, 8),
];

/// Classify a transcript for a child of the given age
#[must_use]
pub fn analyze(transcript: &str, age_months: u32) -> Analysis {
    let intent = classify_intent(transcript, age_months);
    Analysis {
        intent,
        stage: DevelopmentalStage::from_age_months(age_months),
        emotion: classify_emotion(transcript, intent),
        age_appropriate: is_age_appropriate(transcript, age_months),
    }
}

/// Score one keyword list against a transcript
fn score_keywords(transcript: &str, keywords: &[&str]) -> f32 {
    let mut score = 0.0;
    for keyword in keywords {
        if transcript.contains(keyword) {
            score += 1.0;
            if keyword.chars().count() > 2 {
                score += 0.5;
            }
        }
    }
    score
}

/// Classify intent; ties keep the earlier category in [`Intent::ALL`] order
#[must_use]
pub fn classify_intent(transcript: &str, age_months: u32) -> Intent {
    let mut best: Option<Intent> = None;
    let mut max_score = 0.0_f32;

    for (intent, keywords) in INTENT_KEYWORDS {
        let score = score_keywords(transcript, keywords);
        if score > max_score {
            max_score = score;
            best = Some(intent);
        }
    }

    match best {
        Some(intent) if max_score >= INTENT_SCORE_THRESHOLD => intent,
        _ => default_intent_for_age(age_months),
    }
}

/// Default intent when no keyword matched
#[must_use]
pub const fn default_intent_for_age(age_months: u32) -> Intent {
    if age_months < 18 {
        Intent::VocalPlay
    } else if age_months < 24 {
        Intent::ItemRequest
    } else {
        Intent::PlayRequest
    }
}

/// Classify emotion, falling back to the intent-default mapping
#[must_use]
pub fn classify_emotion(transcript: &str, intent: Intent) -> Emotion {
    for (emotion, keywords) in EMOTION_KEYWORDS {
        if keywords.iter().any(|keyword| transcript.contains(keyword)) {
            return emotion;
        }
    }
    Emotion::default_for_intent(intent)
}

/// Whether the utterance length fits the word-count band for this age
#[must_use]
pub fn is_age_appropriate(transcript: &str, age_months: u32) -> bool {
    let word_count = transcript.split_whitespace().count();
    for (min_age, max_age, min_words, max_words) in AGE_WORD_BANDS {
        if (min_age..max_age).contains(&age_months) {
            return (min_words..=max_words).contains(&word_count);
        }
    }
    false
}

/// The most specific word the intent tables recognized in the transcript.
///
/// Used by the template strategy to fill `{word}` placeholders: the longest
/// matched keyword for the chosen intent, falling back to the first
/// whitespace token, falling back to the trimmed transcript.
#[must_use]
pub fn salient_word<'a>(transcript: &'a str, intent: Intent) -> &'a str {
    INTENT_KEYWORDS
        .iter()
        .find(|(candidate, _)| *candidate == intent)
        .and_then(|(_, keywords)| {
            keywords
                .iter()
                .filter(|keyword| transcript.contains(**keyword))
                .max_by_key(|keyword| keyword.chars().count())
                .copied()
        })
        .or_else(|| transcript.split_whitespace().next())
        .unwrap_or_else(|| transcript.trim())
}
