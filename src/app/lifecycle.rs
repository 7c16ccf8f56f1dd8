//! Usage: Primary window lifecycle model (visibility, maximized state, quit gate).
//!
//! Tauri window events are translated into calls on [`MainWindowLifecycle`]; the returned
//! decisions tell the window controller what to do with the native window. Keeping the
//! transitions here lets them be tested without a display.

use crate::settings::{AppSettings, WindowBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visibility {
    Hidden,
    Visible,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frame {
    Normal,
    Maximized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseDecision {
    /// Prevent the close and hide the window to the tray.
    Hide,
    /// Let the window be destroyed.
    Proceed,
}

/// What to do once the first page load has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FirstPaint {
    pub maximize: bool,
    pub show: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToggleDecision {
    Show,
    Hide,
}

/// Geometry observed on a resize/move/maximize event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObservedGeometry {
    pub maximized: bool,
    pub minimized: bool,
    pub visible: bool,
    pub bounds: WindowBounds,
}

#[derive(Debug)]
pub(crate) struct MainWindowLifecycle {
    visibility: Visibility,
    frame: Frame,
    quitting: bool,
    first_paint_done: bool,
    minimized_seen: bool,
}

impl Default for MainWindowLifecycle {
    fn default() -> Self {
        Self {
            visibility: Visibility::Hidden,
            frame: Frame::Normal,
            quitting: false,
            first_paint_done: false,
            minimized_seen: false,
        }
    }
}

impl MainWindowLifecycle {
    pub(crate) fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub(crate) fn frame(&self) -> Frame {
        self.frame
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Enters the terminal quitting state. Irreversible.
    pub(crate) fn begin_quit(&mut self) {
        self.quitting = true;
    }

    /// Runs once per window; later page loads (reloads, navigation) return `None`.
    pub(crate) fn first_paint(
        &mut self,
        settings: &AppSettings,
        launched_hidden: bool,
    ) -> Option<FirstPaint> {
        if self.first_paint_done || self.visibility == Visibility::Destroyed {
            return None;
        }
        self.first_paint_done = true;

        let decision = FirstPaint {
            maximize: settings.is_maximized,
            show: !settings.start_minimized && !launched_hidden,
        };
        if decision.maximize {
            self.frame = Frame::Maximized;
        }
        if decision.show {
            self.visibility = Visibility::Visible;
        }
        Some(decision)
    }

    /// Feeds the native minimized flag from any event or poll that may reveal a minimize.
    /// Returns `true` only on the edge into minimized, when the window must be hidden instead.
    pub(crate) fn minimize_observed(&mut self, minimized: bool) -> bool {
        let entered = minimized && !self.minimized_seen;
        self.minimized_seen = minimized;
        if !entered || self.visibility == Visibility::Destroyed {
            return false;
        }
        self.visibility = Visibility::Hidden;
        true
    }

    pub(crate) fn close_requested(&mut self) -> CloseDecision {
        match self.visibility {
            Visibility::Destroyed => CloseDecision::Proceed,
            _ if self.quitting => {
                self.visibility = Visibility::Destroyed;
                CloseDecision::Proceed
            }
            _ => {
                self.visibility = Visibility::Hidden;
                CloseDecision::Hide
            }
        }
    }

    /// External show command (tray, second instance, dock reopen). `false` once destroyed.
    pub(crate) fn show(&mut self) -> bool {
        if self.visibility == Visibility::Destroyed {
            return false;
        }
        self.visibility = Visibility::Visible;
        self.minimized_seen = false;
        true
    }

    /// Decides a tray double-click from the native window's current visibility.
    pub(crate) fn toggle(&mut self, currently_visible: bool) -> Option<ToggleDecision> {
        if self.visibility == Visibility::Destroyed {
            return None;
        }
        if currently_visible {
            self.visibility = Visibility::Hidden;
            Some(ToggleDecision::Hide)
        } else {
            self.visibility = Visibility::Visible;
            self.minimized_seen = false;
            Some(ToggleDecision::Show)
        }
    }

    pub(crate) fn destroyed(&mut self) {
        self.visibility = Visibility::Destroyed;
    }

    /// Folds an observed geometry change into `settings`. Returns `true` when the record changed
    /// and should be persisted.
    pub(crate) fn capture_geometry(
        &mut self,
        settings: &mut AppSettings,
        observed: ObservedGeometry,
    ) -> bool {
        if self.visibility == Visibility::Destroyed || observed.minimized || !observed.visible {
            return false;
        }

        self.frame = if observed.maximized {
            Frame::Maximized
        } else {
            Frame::Normal
        };

        let mut changed = false;
        if settings.is_maximized != observed.maximized {
            settings.is_maximized = observed.maximized;
            changed = true;
        }
        if !observed.maximized && settings.window_bounds != observed.bounds {
            settings.window_bounds = observed.bounds;
            changed = true;
        }
        changed
    }
}
