use serde::{Deserialize, Serialize};

/// Timing of the splash screen shown before the page content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplashConfig {
    /// How long the splash stays fully visible (ms).
    #[serde(default = "default_hold_ms")]
    pub hold_ms: f64,
    /// Length of the fade from splash to content (ms).
    #[serde(default = "default_reveal_ms")]
    pub reveal_ms: f64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            hold_ms: default_hold_ms(),
            reveal_ms: default_reveal_ms(),
        }
    }
}

fn default_hold_ms() -> f64 {
    3000.0
}

fn default_reveal_ms() -> f64 {
    500.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum LoaderPhase {
    /// Only the splash is shown.
    Splash,
    /// Content fading in; `content_opacity` runs from 0 to 1.
    Reveal { content_opacity: f64 },
    /// Splash removed, content fully shown.
    Done,
}

impl LoaderPhase {
    /// Whether scroll tracking should run. The page is not interactive while
    /// the splash covers it.
    pub fn content_visible(self) -> bool {
        !matches!(self, LoaderPhase::Splash)
    }
}

/// Splash timer sequence, evaluated from elapsed time since page start.
///
/// Stateless apart from its config: hosts sample it with whatever clock
/// they have (`performance.now()` in the browser, `Instant` natively).
#[derive(Debug, Clone, Copy, Default)]
pub struct SplashLoader {
    config: SplashConfig,
}

impl SplashLoader {
    pub fn new(config: SplashConfig) -> Self {
        Self { config }
    }

    pub fn phase_at(&self, elapsed_ms: f64) -> LoaderPhase {
        let hold = self.config.hold_ms.max(0.0);
        let reveal = self.config.reveal_ms.max(0.0);
        if elapsed_ms < hold {
            LoaderPhase::Splash
        } else if elapsed_ms < hold + reveal {
            LoaderPhase::Reveal {
                content_opacity: ((elapsed_ms - hold) / reveal).clamp(0.0, 1.0),
            }
        } else {
            LoaderPhase::Done
        }
    }

    /// Total time until `Done` (ms).
    pub fn total_ms(&self) -> f64 {
        self.config.hold_ms.max(0.0) + self.config.reveal_ms.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequence() {
        let loader = SplashLoader::default();
        assert_eq!(loader.phase_at(0.0), LoaderPhase::Splash);
        assert_eq!(loader.phase_at(2999.0), LoaderPhase::Splash);
        assert_eq!(
            loader.phase_at(3000.0),
            LoaderPhase::Reveal {
                content_opacity: 0.0
            }
        );
        assert_eq!(
            loader.phase_at(3250.0),
            LoaderPhase::Reveal {
                content_opacity: 0.5
            }
        );
        assert_eq!(loader.phase_at(3500.0), LoaderPhase::Done);
        assert_eq!(loader.total_ms(), 3500.0);
    }

    #[test]
    fn zero_reveal_skips_fade() {
        let loader = SplashLoader::new(SplashConfig {
            hold_ms: 100.0,
            reveal_ms: 0.0,
        });
        assert_eq!(loader.phase_at(99.0), LoaderPhase::Splash);
        assert_eq!(loader.phase_at(100.0), LoaderPhase::Done);
    }

    #[test]
    fn tracking_waits_for_content() {
        let loader = SplashLoader::default();
        assert!(!loader.phase_at(10.0).content_visible());
        assert!(loader.phase_at(3100.0).content_visible());
        assert!(loader.phase_at(9000.0).content_visible());
    }

    #[test]
    fn phase_json_is_tagged() {
        let loader = SplashLoader::default();
        let json = |ms| serde_json::to_value(loader.phase_at(ms)).expect("serializable");
        assert_eq!(json(0.0), serde_json::json!({ "phase": "splash" }));
        assert_eq!(
            json(3250.0),
            serde_json::json!({ "phase": "reveal", "content_opacity": 0.5 })
        );
        assert_eq!(json(4000.0), serde_json::json!({ "phase": "done" }));
    }
}
