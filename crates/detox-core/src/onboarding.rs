//! First-run walkthrough.

/// One informational step of the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub description: &'static str,
}

/// The fixed walkthrough, in order.
pub const ONBOARDING_STEPS: [OnboardingStep; 4] = [
    OnboardingStep {
        title: "Welcome to Brain Detox",
        description: "Take control of your digital habits and reduce mindless scrolling. \
                      Set limits, block distractions, and focus on what matters most.",
    },
    OnboardingStep {
        title: "Smart App Blocking",
        description: "Block distracting apps when you reach your daily limits. \
                      Our intelligent system helps you stay focused and productive.",
    },
    OnboardingStep {
        title: "Time Tracking",
        description: "Monitor your screen time and track focus sessions. \
                      Build awareness of your digital habits with detailed insights.",
    },
    OnboardingStep {
        title: "Progress Analytics",
        description: "View your daily and weekly progress. Celebrate achievements and \
                      identify areas for improvement in your digital wellness journey.",
    },
];

/// Position in the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Onboarding {
    index: usize,
}

impl Onboarding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the current step.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        ONBOARDING_STEPS.len()
    }

    pub fn is_empty(&self) -> bool {
        ONBOARDING_STEPS.is_empty()
    }

    pub fn current(&self) -> Option<&'static OnboardingStep> {
        ONBOARDING_STEPS.get(self.index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index.saturating_add(1) >= self.len()
    }

    /// Advances one step. Returns true when called on the last step,
    /// meaning the walkthrough is complete.
    #[must_use]
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return true;
        }
        self.index = self.index.saturating_add(1);
        false
    }

    /// Goes back one step, stopping at the first.
    pub fn back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_welcome() {
        let onboarding = Onboarding::new();
        assert!(onboarding.is_first());
        assert_eq!(onboarding.current().map(|s| s.title), Some("Welcome to Brain Detox"));
    }

    #[test]
    fn test_next_completes_on_last_step() {
        let mut onboarding = Onboarding::new();
        assert!(!onboarding.advance());
        assert!(!onboarding.advance());
        assert!(!onboarding.advance());
        assert_eq!(onboarding.index(), 3);
        assert!(onboarding.is_last());
        assert!(onboarding.advance());
        assert_eq!(onboarding.index(), 3);
    }

    #[test]
    fn test_back_clamps_at_zero() {
        let mut onboarding = Onboarding::new();
        onboarding.back();
        assert_eq!(onboarding.index(), 0);

        let _ = onboarding.advance();
        onboarding.back();
        assert_eq!(onboarding.index(), 0);
    }
}
