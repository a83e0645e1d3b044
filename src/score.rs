/// Attributes of a submission that feed the trust score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreInput<'a> {
    pub rating: Option<i32>,
    pub review_text: Option<&'a str>,
    pub google_review_url: Option<&'a str>,
    /// Accepted but has no effect on the score.
    pub dob: Option<&'a str>,
}

const BASE_SCORE: i64 = 50;

/// Deterministic trust score in `[0, 100]`.
pub fn compute_score(input: ScoreInput<'_>) -> i32 {
    let ScoreInput {
        rating,
        review_text,
        google_review_url,
        dob: _,
    } = input;

    let mut score = match rating {
        Some(r) => (i64::from(r) * 20).clamp(0, 100),
        None => BASE_SCORE,
    };

    let len = review_text.map(|t| t.trim().chars().count()).unwrap_or(0);
    if len > 100 {
        score += 10;
    } else if len > 50 {
        score += 5;
    }

    if google_review_url.is_some_and(|u| !u.is_empty()) {
        score += 15;
    }

    score.clamp(0, 100) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(rating: Option<i32>, text: &str, url: Option<&str>) -> i32 {
        compute_score(ScoreInput {
            rating,
            review_text: Some(text),
            google_review_url: url,
            dob: None,
        })
    }

    #[test]
    fn base_cases() {
        assert_eq!(score(Some(5), "", None), 100);
        assert_eq!(score(None, "", None), 50);
        assert_eq!(score(None, &"x".repeat(101), Some("x")), 75);
    }

    #[test]
    fn rating_overrides_base() {
        assert_eq!(score(Some(1), "", None), 20);
        assert_eq!(score(Some(3), "", None), 60);
        assert_eq!(score(Some(0), "", None), 0);
        assert_eq!(score(Some(-4), "", None), 0);
        assert_eq!(score(Some(9), "", None), 100);
        assert_eq!(score(Some(i32::MAX), "", None), 100);
        assert_eq!(score(Some(i32::MIN), "", None), 0);
    }

    #[test]
    fn length_bonus_uses_trimmed_text() {
        assert_eq!(score(None, &"a".repeat(50), None), 50);
        assert_eq!(score(None, &"a".repeat(51), None), 55);
        assert_eq!(score(None, &"a".repeat(100), None), 55);
        assert_eq!(score(None, &"a".repeat(101), None), 60);
        let padded = format!("   {}   ", "a".repeat(50));
        assert_eq!(score(None, &padded, None), 50);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 51 two-byte characters
        assert_eq!(score(None, &"é".repeat(51), None), 55);
        assert_eq!(score(None, &"é".repeat(30), None), 50);
    }

    #[test]
    fn empty_url_earns_nothing() {
        assert_eq!(score(Some(2), "", Some("")), 40);
        assert_eq!(score(Some(2), "", Some("https://g.page/r/abc")), 55);
    }

    #[test]
    fn total_is_clamped() {
        assert_eq!(score(Some(5), &"a".repeat(200), Some("x")), 100);
        assert_eq!(score(Some(4), &"a".repeat(200), Some("x")), 100);
        assert_eq!(score(Some(3), &"a".repeat(200), Some("x")), 85);
    }

    #[test]
    fn missing_text_is_zero_length() {
        let s = compute_score(ScoreInput {
            rating: None,
            review_text: None,
            google_review_url: None,
            dob: None,
        });
        assert_eq!(s, 50);
    }

    #[test]
    fn dob_has_no_effect() {
        let without = ScoreInput {
            rating: Some(4),
            review_text: Some("solid bike, fair price"),
            google_review_url: Some("x"),
            dob: None,
        };
        let with = ScoreInput {
            dob: Some("1990-01-01"),
            ..without
        };
        let garbage = ScoreInput {
            dob: Some("not a date"),
            ..without
        };
        assert_eq!(compute_score(without), compute_score(with));
        assert_eq!(compute_score(without), compute_score(garbage));
    }

    proptest! {
        #[test]
        fn prop_score_always_within_bounds(
            rating in proptest::option::of(any::<i32>()),
            text in ".{0,300}",
            url in proptest::option::of(".{0,20}"),
            dob in proptest::option::of(".{0,12}"),
        ) {
            let s = compute_score(ScoreInput {
                rating,
                review_text: Some(&text),
                google_review_url: url.as_deref(),
                dob: dob.as_deref(),
            });
            prop_assert!((0..=100).contains(&s));
        }

        #[test]
        fn prop_score_is_deterministic(
            rating in proptest::option::of(-10i32..10),
            text in ".{0,150}",
            url in proptest::option::of("[a-z]{0,8}"),
        ) {
            let input = ScoreInput {
                rating,
                review_text: Some(&text),
                google_review_url: url.as_deref(),
                dob: None,
            };
            prop_assert_eq!(compute_score(input), compute_score(input));
        }
    }
}
