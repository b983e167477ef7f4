//! Polling option normalization
//!
//! Callers hand the engine a loosely-typed [`PollingOptions`] record in which
//! every field is optional and nothing is validated. [`normalize`] turns that
//! into a [`NormalizedPollingOptions`] execution plan that is always safe to
//! run: no NaN, nothing negative, every field resolved.
//!
//! Normalization is total. Garbage input degrades to a safe default instead
//! of failing, because this sits on the hot path of every polled call.

/// Default client-side delay between status queries, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: f64 = 250.0;

/// Default cap on follow-up status queries.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;

/// Attempt budget as supplied by the caller.
///
/// `Unlimited` is an explicit opt-out of the cap; a missing budget
/// (`None` at the [`PollingOptions`] level) means "use the default".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptBudget {
    /// Never give up due to attempt count.
    Unlimited,
    /// Cap on follow-up queries. Sanitized during normalization, so any
    /// number is acceptable here.
    Limited(f64),
}

/// Resolved attempt budget. Either unlimited or a whole, non-negative cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptLimit {
    /// The loop only terminates via a terminal response, an error, or
    /// cancellation.
    Unlimited,
    /// Maximum number of interim responses tolerated before giving up.
    Limited(u32),
}

/// User-supplied polling options. All fields optional, nothing validated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PollingOptions {
    /// Long-poll hint: ask the server to hold the response up to this many
    /// milliseconds before answering.
    pub wait_ms: Option<f64>,

    /// Client-side delay between successive status queries, in milliseconds.
    pub poll_interval_ms: Option<f64>,

    /// Cap on follow-up queries. `None` means "use the default".
    pub max_poll_attempts: Option<AttemptBudget>,
}

/// Fully resolved polling options.
///
/// Invariants: `wait_ms` is never NaN and never negative, `poll_interval_ms`
/// is always finite and non-negative, and a limited attempt budget is a
/// whole number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPollingOptions {
    /// Long-poll hint, or `None` when no hint should be sent.
    pub wait_ms: Option<f64>,

    /// Delay between successive status queries, in milliseconds.
    pub poll_interval_ms: f64,

    /// Resolved attempt budget.
    pub max_poll_attempts: AttemptLimit,
}

impl Default for NormalizedPollingOptions {
    fn default() -> Self {
        normalize(&PollingOptions::default())
    }
}

impl NormalizedPollingOptions {
    /// Converts back into the loose input form.
    ///
    /// Feeding the result through [`normalize`] again is the identity.
    pub fn as_options(&self) -> PollingOptions {
        PollingOptions {
            wait_ms: self.wait_ms,
            poll_interval_ms: Some(self.poll_interval_ms),
            max_poll_attempts: Some(match self.max_poll_attempts {
                AttemptLimit::Unlimited => AttemptBudget::Unlimited,
                AttemptLimit::Limited(n) => AttemptBudget::Limited(f64::from(n)),
            }),
        }
    }
}

/// Validates and fills in a user-supplied options record.
///
/// Each field is sanitized independently:
/// - `wait_ms`: absent, NaN, or negative becomes `None` (no hint sent);
///   anything else passes through.
/// - `poll_interval_ms`: anything that is not a finite number becomes the
///   default of 250 ms; negative values clamp to 0.
/// - `max_poll_attempts`: [`AttemptBudget::Unlimited`] is preserved as-is;
///   a missing or non-finite cap becomes the default of 60; otherwise the
///   cap is truncated toward zero and clamped at 0. Truncation, not
///   rounding: the cap is a count of whole tries.
pub fn normalize(options: &PollingOptions) -> NormalizedPollingOptions {
    NormalizedPollingOptions {
        wait_ms: normalize_wait_ms(options.wait_ms),
        poll_interval_ms: normalize_poll_interval(options.poll_interval_ms),
        max_poll_attempts: normalize_max_attempts(options.max_poll_attempts),
    }
}

fn normalize_wait_ms(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => None,
        // max() folds -0.0 into 0.0
        Some(v) => Some(v.max(0.0)),
        None => None,
    }
}

fn normalize_poll_interval(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.max(0.0),
        _ => DEFAULT_POLL_INTERVAL_MS,
    }
}

fn normalize_max_attempts(value: Option<AttemptBudget>) -> AttemptLimit {
    match value {
        Some(AttemptBudget::Unlimited) => AttemptLimit::Unlimited,
        // Saturating float-to-int cast handles caps beyond u32::MAX
        Some(AttemptBudget::Limited(v)) if v.is_finite() => {
            AttemptLimit::Limited(v.max(0.0).trunc() as u32)
        }
        _ => AttemptLimit::Limited(DEFAULT_MAX_POLL_ATTEMPTS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_yield_defaults() {
        let normalized = normalize(&PollingOptions::default());

        assert_eq!(normalized.wait_ms, None);
        assert_eq!(normalized.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(
            normalized.max_poll_attempts,
            AttemptLimit::Limited(DEFAULT_MAX_POLL_ATTEMPTS)
        );
    }

    #[test]
    fn test_sanitizes_invalid_values() {
        let normalized = normalize(&PollingOptions {
            wait_ms: Some(-5.0),
            poll_interval_ms: Some(f64::NAN),
            max_poll_attempts: Some(AttemptBudget::Limited(-10.0)),
        });

        assert_eq!(normalized.wait_ms, None);
        assert_eq!(normalized.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(normalized.max_poll_attempts, AttemptLimit::Limited(0));
    }

    #[test]
    fn test_keeps_valid_values() {
        let normalized = normalize(&PollingOptions {
            wait_ms: Some(1000.0),
            poll_interval_ms: Some(750.0),
            max_poll_attempts: Some(AttemptBudget::Limited(5.0)),
        });

        assert_eq!(normalized.wait_ms, Some(1000.0));
        assert_eq!(normalized.poll_interval_ms, 750.0);
        assert_eq!(normalized.max_poll_attempts, AttemptLimit::Limited(5));
    }

    #[test]
    fn test_unlimited_budget_preserved() {
        let normalized = normalize(&PollingOptions {
            max_poll_attempts: Some(AttemptBudget::Unlimited),
            ..Default::default()
        });

        assert_eq!(normalized.max_poll_attempts, AttemptLimit::Unlimited);
    }

    #[test]
    fn test_nan_wait_hint_dropped() {
        let normalized = normalize(&PollingOptions {
            wait_ms: Some(f64::NAN),
            ..Default::default()
        });

        assert_eq!(normalized.wait_ms, None);
    }

    #[test]
    fn test_negative_interval_clamps_to_zero() {
        let normalized = normalize(&PollingOptions {
            poll_interval_ms: Some(-100.0),
            ..Default::default()
        });

        assert_eq!(normalized.poll_interval_ms, 0.0);
    }

    #[test]
    fn test_infinite_interval_falls_back_to_default() {
        let normalized = normalize(&PollingOptions {
            poll_interval_ms: Some(f64::INFINITY),
            ..Default::default()
        });

        assert_eq!(normalized.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_fractional_budget_truncates_toward_zero() {
        let normalized = normalize(&PollingOptions {
            max_poll_attempts: Some(AttemptBudget::Limited(3.9)),
            ..Default::default()
        });

        assert_eq!(normalized.max_poll_attempts, AttemptLimit::Limited(3));
    }

    #[test]
    fn test_non_finite_budget_falls_back_to_default() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let normalized = normalize(&PollingOptions {
                max_poll_attempts: Some(AttemptBudget::Limited(bad)),
                ..Default::default()
            });

            assert_eq!(
                normalized.max_poll_attempts,
                AttemptLimit::Limited(DEFAULT_MAX_POLL_ATTEMPTS)
            );
        }
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            PollingOptions::default(),
            PollingOptions {
                wait_ms: Some(-5.0),
                poll_interval_ms: Some(f64::NAN),
                max_poll_attempts: Some(AttemptBudget::Limited(-10.0)),
            },
            PollingOptions {
                wait_ms: Some(1000.0),
                poll_interval_ms: Some(750.0),
                max_poll_attempts: Some(AttemptBudget::Unlimited),
            },
            PollingOptions {
                wait_ms: Some(0.0),
                poll_interval_ms: Some(0.0),
                max_poll_attempts: Some(AttemptBudget::Limited(2.5)),
            },
        ];

        for input in inputs {
            let once = normalize(&input);
            let twice = normalize(&once.as_options());
            assert_eq!(once, twice);
        }
    }
}
