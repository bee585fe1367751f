/// Tuning knobs for Pearson correlation.
///
/// Defaults match the plain [`pearson_correlation`](crate::correlation::pearson_correlation)
/// contract and can be overridden via environment variables with [`CorrelationConfig::from_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationConfig {
    /// Minimum number of observations per series (never below 2)
    pub min_observations: usize,
    /// Clamp results into [-1, 1] to absorb floating point overshoot
    pub clamp: bool,
}

/// Fewest observations for which a correlation is defined.
pub const MIN_OBSERVATIONS: usize = 2;

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_observations: MIN_OBSERVATIONS,
            clamp: true,
        }
    }
}

impl CorrelationConfig {
    /// Build a configuration from `CORRELATION_MIN_OBSERVATIONS` and `CORRELATION_CLAMP`,
    /// falling back to defaults for absent or unparseable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let min_observations = lookup("CORRELATION_MIN_OBSERVATIONS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.min_observations);

        let clamp = lookup("CORRELATION_CLAMP")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.clamp);

        Self::default()
            .with_min_observations(min_observations)
            .with_clamp(clamp)
    }

    /// Set minimum observations, floored at [`MIN_OBSERVATIONS`]
    pub fn with_min_observations(mut self, min_observations: usize) -> Self {
        self.min_observations = min_observations.max(MIN_OBSERVATIONS);
        self
    }

    /// Enable or disable clamping
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_config_from_lookup() {
        struct TestCase {
            input: Vec<(&'static str, &'static str)>,
            expected: CorrelationConfig,
        }

        let tests = vec![
            TestCase {
                // TC0: nothing set uses defaults
                input: vec![],
                expected: CorrelationConfig {
                    min_observations: 2,
                    clamp: true,
                },
            },
            TestCase {
                // TC1: both overridden
                input: vec![
                    ("CORRELATION_MIN_OBSERVATIONS", "5"),
                    ("CORRELATION_CLAMP", "false"),
                ],
                expected: CorrelationConfig {
                    min_observations: 5,
                    clamp: false,
                },
            },
            TestCase {
                // TC2: minimum floored at 2
                input: vec![("CORRELATION_MIN_OBSERVATIONS", "0")],
                expected: CorrelationConfig {
                    min_observations: 2,
                    clamp: true,
                },
            },
            TestCase {
                // TC3: unparseable values fall back to defaults
                input: vec![
                    ("CORRELATION_MIN_OBSERVATIONS", "many"),
                    ("CORRELATION_CLAMP", "maybe"),
                ],
                expected: CorrelationConfig::default(),
            },
            TestCase {
                // TC4: numeric flag with whitespace
                input: vec![("CORRELATION_CLAMP", " 0 ")],
                expected: CorrelationConfig {
                    min_observations: 2,
                    clamp: false,
                },
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = CorrelationConfig::from_lookup(lookup_from(&test.input));
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }
}
