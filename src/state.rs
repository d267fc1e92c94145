/// Boolean state of one window context.
///
/// The flags are independent; a window can be maximized and iconified at
/// the same time, in which case iconified wins when reporting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    resizable: bool,
    on_top: bool,
    fullscreen: bool,
    iconified: bool,
    maximized: bool,
    mouse_entered: bool,
    disabled: bool,
    realized: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowFlags {
    pub fn new() -> Self {
        Self {
            resizable: true,
            on_top: false,
            fullscreen: false,
            iconified: false,
            maximized: false,
            mouse_entered: false,
            disabled: false,
            realized: false,
        }
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    pub fn on_top(&self) -> bool {
        self.on_top
    }

    pub fn set_on_top(&mut self, on_top: bool) {
        self.on_top = on_top;
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn iconified(&self) -> bool {
        self.iconified
    }

    pub fn set_iconified(&mut self, iconified: bool) {
        self.iconified = iconified;
    }

    pub fn maximized(&self) -> bool {
        self.maximized
    }

    pub fn set_maximized(&mut self, maximized: bool) {
        self.maximized = maximized;
    }

    pub fn mouse_entered(&self) -> bool {
        self.mouse_entered
    }

    /// Records the crossing state and reports whether it changed.
    pub fn set_mouse_entered(&mut self, entered: bool) -> bool {
        if self.mouse_entered == entered {
            return false;
        }
        self.mouse_entered = entered;
        true
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn enabled(&self) -> bool {
        !self.disabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    pub fn realized(&self) -> bool {
        self.realized
    }

    pub fn set_realized(&mut self) {
        self.realized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_resizable_and_enabled() {
        let f = WindowFlags::new();
        assert!(f.resizable());
        assert!(f.enabled());
        assert!(!f.realized());
        assert!(!f.on_top());
    }

    #[test]
    fn mouse_entered_reports_changes_only() {
        let mut f = WindowFlags::new();
        // same value -> no change
        assert!(!f.set_mouse_entered(false));
        assert!(f.set_mouse_entered(true));
        assert!(f.mouse_entered());
        // repeated enter is not a change
        assert!(!f.set_mouse_entered(true));
        assert!(f.set_mouse_entered(false));
    }

    #[test]
    fn enabled_mirrors_disabled() {
        let mut f = WindowFlags::new();
        f.set_enabled(false);
        assert!(f.disabled());
        assert!(!f.enabled());
    }
}
