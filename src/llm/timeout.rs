use std::time::Duration;

/// Sizes the request timeout from the prompt length.
///
/// The estimate is `words * tokens_per_word` tokens, each granted
/// `secs_per_token` seconds, never less than `min_secs`. The defaults
/// assume roughly 25 tokens per second with a one minute floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeoutPolicy {
    pub min_secs: u64,
    pub tokens_per_word: f64,
    pub secs_per_token: f64,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            min_secs: 60,
            tokens_per_word: 1.3,
            secs_per_token: 0.04,
        }
    }
}

impl TimeoutPolicy {
    pub fn estimate_tokens(&self, prompt: &str) -> f64 {
        prompt.split_whitespace().count() as f64 * self.tokens_per_word
    }

    pub fn timeout_for(&self, prompt: &str) -> Duration {
        // `as` saturates: NaN and negatives become 0.
        let scaled = (self.estimate_tokens(prompt) * self.secs_per_token).floor() as u64;
        Duration::from_secs(scaled.max(self.min_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn short_prompts_get_the_floor() {
        let policy = TimeoutPolicy::default();
        assert_eq!(policy.timeout_for(""), Duration::from_secs(60));
        assert_eq!(policy.timeout_for("hello there"), Duration::from_secs(60));
        // floor(1000 * 1.3 * 0.04) = 52
        assert_eq!(policy.timeout_for(&words(1_000)), Duration::from_secs(60));
    }

    #[test]
    fn long_prompts_scale_with_size() {
        let policy = TimeoutPolicy::default();
        assert_eq!(policy.timeout_for(&words(10_000)), Duration::from_secs(520));
        assert_eq!(policy.timeout_for(&words(2_000)), Duration::from_secs(104));
        assert_eq!(policy.timeout_for(&words(1_924)), Duration::from_secs(100));
    }

    #[test]
    fn any_whitespace_separates_words() {
        let policy = TimeoutPolicy::default();
        assert_eq!(policy.estimate_tokens("a\tb\n\nc   d"), 4.0 * 1.3);
    }

    #[test]
    fn floor_is_configurable() {
        let policy = TimeoutPolicy {
            min_secs: 5,
            ..TimeoutPolicy::default()
        };
        assert_eq!(policy.timeout_for(&words(200)), Duration::from_secs(10));
        assert_eq!(policy.timeout_for("one"), Duration::from_secs(5));
    }
}
