//! Comparison configuration.
//!
//! The only runtime knob is the aligned-row sample size used for
//! column-mapping confidence; every algorithm threshold is a compile-time
//! constant next to the code it governs.

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_SAMPLE_SIZE_MAPPING: i64 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Aligned-row sample size for mapping confidence. Negative values are
    /// clamped to zero; zero disables sampling entirely (every pair then
    /// scores a sample similarity of 0).
    pub sample_size_mapping: i64,
}

impl Default for CompareConfig {
    fn default() -> CompareConfig {
        CompareConfig {
            sample_size_mapping: DEFAULT_SAMPLE_SIZE_MAPPING,
        }
    }
}

impl CompareConfig {
    /// The effective, clamped sample size.
    pub fn sample_size(&self) -> usize {
        self.sample_size_mapping.max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sample_size_is_256() {
        assert_eq!(CompareConfig::default().sample_size_mapping, 256);
        assert_eq!(CompareConfig::default().sample_size(), 256);
    }

    #[test]
    fn negative_sample_size_clamps_to_zero() {
        let config = CompareConfig {
            sample_size_mapping: -5,
        };
        assert_eq!(config.sample_size(), 0);
    }

    #[test]
    fn serde_defaults_missing_fields() {
        let config: CompareConfig = serde_json::from_str("{}").expect("empty object parses");
        assert_eq!(config, CompareConfig::default());

        let config: CompareConfig =
            serde_json::from_str(r#"{"sample_size_mapping": 17}"#).expect("parses");
        assert_eq!(config.sample_size(), 17);
    }
}
