//! SoftKeys demo shell.
//!
//! Drives a keyboard panel the way a pointer would: every character of the
//! requested text is turned into pointer-up events on the matching keys,
//! pressing shift where the casing requires it.

use softkeys_core::{KeyboardPanel, ENTER_KEY, SHIFT_KEY};

/// Outcome of typing a string through the keyboard.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TypingReport {
    /// Pointer-up events dispatched, shift presses included.
    pub presses: usize,
    /// Characters with no key on the panel.
    pub skipped: Vec<char>,
}

/// Type `text` by tapping keys on `panel`.
pub fn type_text(panel: &mut KeyboardPanel, text: &str) -> TypingReport {
    let mut report = TypingReport::default();

    for c in text.chars() {
        let label = match c {
            '\n' | '\r' => ENTER_KEY.to_string(),
            c => c.to_lowercase().collect(),
        };
        let Some(position) = panel.find_key(&label) else {
            log::warn!("No key for {:?}", c);
            report.skipped.push(c);
            continue;
        };

        let wants_upper = c.is_uppercase();
        let wants_lower = c.is_lowercase();
        // At most two shift presses reach any state
        for _ in 0..2 {
            let active = panel.shift_state().is_active();
            if (wants_upper && !active) || (wants_lower && active) {
                if !tap(panel, SHIFT_KEY, &mut report) {
                    break;
                }
            } else {
                break;
            }
        }

        panel.pointer_up(position);
        report.presses += 1;
    }

    report
}

fn tap(panel: &mut KeyboardPanel, label: &str, report: &mut TypingReport) -> bool {
    match panel.find_key(label) {
        Some(position) => {
            panel.pointer_up(position);
            report.presses += 1;
            true
        }
        None => {
            log::warn!("Layout has no {:?} key", label);
            false
        }
    }
}
