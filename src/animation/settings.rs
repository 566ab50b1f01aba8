//! App-wide animation switch.
//!
//! Snapshot tests need every transition to land on its end state in the same
//! frame it starts. Rather than a mutable global, the switch is a plain value
//! that is either handed to a widget at construction or provided once as
//! context for the whole app:
//!
//! ```ignore
//! provide_context(AnimationSettings::disabled());
//! let field = FloatingPlaceholderField::new(frame); // picks it up
//! ```

use crate::reactive::use_context;

use super::{TimingFunction, Transition};

/// Environment variable that disables animations in [`AnimationSettings::from_env`].
pub const DISABLE_ANIMATIONS_ENV: &str = "FLOATLABEL_DISABLE_ANIMATIONS";

/// Default duration of placeholder transitions in milliseconds.
const DEFAULT_DURATION_MS: f32 = 500.0;

#[derive(Clone, Debug)]
pub struct AnimationSettings {
    /// When false every transition has zero duration
    pub enabled: bool,
    pub duration_ms: f32,
    pub timing: TimingFunction,
}

impl AnimationSettings {
    /// Settings with all transitions collapsed to zero duration.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Default settings, disabled when [`DISABLE_ANIMATIONS_ENV`] is set to
    /// anything but `0`, `false` or an empty string.
    pub fn from_env() -> Self {
        match std::env::var(DISABLE_ANIMATIONS_ENV) {
            Ok(value) if env_flag_set(&value) => {
                log::debug!("{} set, animations disabled", DISABLE_ANIMATIONS_ENV);
                Self::disabled()
            }
            _ => Self::default(),
        }
    }

    /// The settings provided as app context, or the defaults.
    pub fn current() -> Self {
        use_context::<AnimationSettings>().unwrap_or_default()
    }

    /// The transition to use for a state change under these settings.
    pub fn transition(&self) -> Transition {
        let duration = if self.enabled { self.duration_ms } else { 0.0 };
        Transition::new(duration, self.timing.clone())
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_DURATION_MS,
            timing: TimingFunction::EaseIn,
        }
    }
}

fn env_flag_set(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{provide_context, reset_contexts};

    #[test]
    fn test_default_is_enabled_ease_in() {
        let settings = AnimationSettings::default();
        assert!(settings.enabled);
        let transition = settings.transition();
        assert_eq!(transition.duration_ms, 500.0);
        assert!(matches!(transition.timing, TimingFunction::EaseIn));
        assert!(!transition.is_instant());
    }

    #[test]
    fn test_disabled_has_zero_duration() {
        assert!(AnimationSettings::disabled().transition().is_instant());
    }

    #[test]
    fn test_current_reads_context() {
        reset_contexts();
        assert!(AnimationSettings::current().enabled);
        provide_context(AnimationSettings::disabled());
        assert!(!AnimationSettings::current().enabled);
        reset_contexts();
    }

    #[test]
    fn test_env_flag_values() {
        assert!(env_flag_set("1"));
        assert!(env_flag_set("yes"));
        assert!(!env_flag_set("0"));
        assert!(!env_flag_set("FALSE"));
        assert!(!env_flag_set(" "));
    }
}
