//! Coaching prompt construction

/// Everything the prompt needs about one interaction
#[derive(Debug, Clone)]
pub struct CoachingRequest {
    /// Child age in months
    pub age_months: u32,
    /// What the child said
    pub transcript: String,
    /// Inferred intent, wire identifier (e.g. "item_request")
    pub intent: String,
    /// Developmental stage, wire identifier (e.g. "word_growth")
    pub stage: String,
}

impl CoachingRequest {
    /// Build the user prompt sent to the chat backend.
    ///
    /// Korean, structured, and explicit about register: the model should
    /// answer as a warm parent, in 2-3 short sentences a toddler can follow.
    #[must_use]
    pub fn build_prompt(&self) -> String {
        format!(
            "당신은 {age}개월 아이와 함께 놀고 있는 사랑스러운 엄마/아빠입니다.\n\
             아이와 자연스럽고 따뜻하게 대화해주세요.\n\n\
             ## 아이 상황\n\
             - 나이: {age}개월\n\
             - 아이가 말한 것: \"{transcript}\"\n\
             - 아이의 의도: {intent}\n\
             - 발달 단계: {stage}\n\n\
             ## 응답 규칙\n\
             - 높고 밝은 톤의 감탄사(\"우와~\", \"와~\")로 따뜻하게 반응하기\n\
             - 아이의 말을 짧게 확장해서 되돌려주기\n\
             - {age}개월 수준의 쉬운 단어와 2-3단어 문장 사용하기\n\
             - 선택지를 주는 짧은 질문으로 끝내기\n\n\
             이제 아이에게 건넬 한두 문장의 응답만 출력하세요:",
            age = self.age_months,
            transcript = self.transcript,
            intent = self.intent,
            stage = self.stage,
        )
    }
}
