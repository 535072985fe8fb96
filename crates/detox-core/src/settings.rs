//! Settings view state.
//!
//! The toggles are local to the view: they are neither persisted nor read
//! by any other component.

/// One of the settings toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingToggle {
    Notifications,
    DarkMode,
    AutoBlock,
    FocusMode,
}

impl SettingToggle {
    /// All toggles in display order.
    pub const ALL: [SettingToggle; 4] = [
        Self::Notifications,
        Self::DarkMode,
        Self::AutoBlock,
        Self::FocusMode,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Notifications => "Notifications",
            Self::DarkMode => "Dark Mode",
            Self::AutoBlock => "Auto-block",
            Self::FocusMode => "Focus Mode",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Notifications => "Get reminders when approaching limits",
            Self::DarkMode => "Switch to dark theme",
            Self::AutoBlock => "Automatically block apps when limits are reached",
            Self::FocusMode => "Block all distracting apps during focus sessions",
        }
    }
}

/// Current toggle values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsState {
    pub notifications: bool,
    pub dark_mode: bool,
    pub auto_block: bool,
    pub focus_mode: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            notifications: true,
            dark_mode: false,
            auto_block: true,
            focus_mode: false,
        }
    }
}

impl SettingsState {
    pub fn get(&self, toggle: SettingToggle) -> bool {
        match toggle {
            SettingToggle::Notifications => self.notifications,
            SettingToggle::DarkMode => self.dark_mode,
            SettingToggle::AutoBlock => self.auto_block,
            SettingToggle::FocusMode => self.focus_mode,
        }
    }

    pub fn toggle(&mut self, toggle: SettingToggle) {
        let slot = match toggle {
            SettingToggle::Notifications => &mut self.notifications,
            SettingToggle::DarkMode => &mut self.dark_mode,
            SettingToggle::AutoBlock => &mut self.auto_block,
            SettingToggle::FocusMode => &mut self.focus_mode,
        };
        *slot = !*slot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SettingsState::default();
        assert!(settings.get(SettingToggle::Notifications));
        assert!(!settings.get(SettingToggle::DarkMode));
        assert!(settings.get(SettingToggle::AutoBlock));
        assert!(!settings.get(SettingToggle::FocusMode));
    }

    #[test]
    fn test_toggle_flips_only_one() {
        let mut settings = SettingsState::default();
        settings.toggle(SettingToggle::DarkMode);
        assert!(settings.dark_mode);
        assert!(settings.notifications);
        settings.toggle(SettingToggle::DarkMode);
        assert_eq!(settings, SettingsState::default());
    }
}
