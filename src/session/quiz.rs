// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

/// Time after which a logged-in, profile-complete session is nudged to take
/// the style quiz.
pub const QUIZ_PROMPT_DELAY: Duration = Duration::from_secs(15);

/// The deferred "take the quiz" nudge, as pure deadline logic.
///
/// Arming happens on the rising edge of eligibility (logged-in AND
/// profile-complete); losing eligibility before the deadline cancels the
/// prompt and rewinds to the unarmed state. Firing while the quiz modal is
/// already open consumes the arming without showing anything.
#[derive(Debug, Default)]
pub struct QuizPrompt {
    armed_at: Option<Instant>,
    fired: bool,
}

impl QuizPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks session eligibility. Call whenever it may have changed.
    pub fn sync(&mut self, eligible: bool, now: Instant) {
        if eligible {
            if self.armed_at.is_none() && !self.fired {
                self.armed_at = Some(now);
            }
        } else {
            self.armed_at = None;
            self.fired = false;
        }
    }

    /// Returns true exactly once per arming, when the delay has elapsed and
    /// the quiz is not already open.
    pub fn poll(&mut self, now: Instant, quiz_open: bool) -> bool {
        let Some(armed_at) = self.armed_at else {
            return false;
        };
        if now.duration_since(armed_at) < QUIZ_PROMPT_DELAY {
            return false;
        }
        self.armed_at = None;
        self.fired = true;
        !quiz_open
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_the_delay() {
        let t0 = Instant::now();
        let mut prompt = QuizPrompt::new();
        prompt.sync(true, t0);

        assert!(!prompt.poll(t0 + Duration::from_secs(14), false));
        assert!(prompt.poll(t0 + QUIZ_PROMPT_DELAY, false));
        assert!(!prompt.poll(t0 + Duration::from_secs(60), false));
    }

    #[test]
    fn losing_eligibility_cancels_the_arming() {
        let t0 = Instant::now();
        let mut prompt = QuizPrompt::new();
        prompt.sync(true, t0);
        prompt.sync(false, t0 + Duration::from_secs(5));

        assert!(!prompt.poll(t0 + Duration::from_secs(30), false));

        // A fresh eligible session re-arms from scratch.
        prompt.sync(true, t0 + Duration::from_secs(40));
        assert!(prompt.poll(t0 + Duration::from_secs(55), false));
    }

    #[test]
    fn open_quiz_suppresses_the_prompt_entirely() {
        let t0 = Instant::now();
        let mut prompt = QuizPrompt::new();
        prompt.sync(true, t0);

        assert!(!prompt.poll(t0 + QUIZ_PROMPT_DELAY, true));
        // Consumed, not deferred: closing the quiz later shows nothing.
        assert!(!prompt.poll(t0 + Duration::from_secs(60), false));
    }

    #[test]
    fn staying_eligible_does_not_rearm() {
        let t0 = Instant::now();
        let mut prompt = QuizPrompt::new();
        prompt.sync(true, t0);
        assert!(prompt.poll(t0 + QUIZ_PROMPT_DELAY, false));
        prompt.sync(true, t0 + Duration::from_secs(20));
        assert!(!prompt.is_armed());
    }
}
