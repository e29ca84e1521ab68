use crate::cue::SetupCue;
use crate::phase::{HoldPhase, Phase, PlaybackPhase};
use foundation::progress::{Progress, ProgressSpan};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    NonFiniteCue { cue: String },
    NegativeTransition { cue: String },
    HideBeforeReveal { cue: String },
    InvalidPhase,
    FadeOutExceedsHold,
    NonPositiveAdvance,
    PlaybackBeforeHoldEnd,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::NonFiniteCue { cue } => {
                write!(f, "cue '{cue}' has a non-finite timing")
            }
            ScheduleError::NegativeTransition { cue } => {
                write!(f, "cue '{cue}' has a negative transition")
            }
            ScheduleError::HideBeforeReveal { cue } => {
                write!(f, "cue '{cue}' hides before it reveals")
            }
            ScheduleError::InvalidPhase => {
                write!(f, "phase timings must be finite and non-negative")
            }
            ScheduleError::FadeOutExceedsHold => {
                write!(f, "hold fade-out exceeds the hold duration")
            }
            ScheduleError::NonPositiveAdvance => {
                write!(f, "playback advance per record must be positive")
            }
            ScheduleError::PlaybackBeforeHoldEnd => {
                write!(f, "playback starts before the hold ends")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Everything the schedule knows about one timeline position.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSample {
    pub phase: Phase,
    /// Record on screen, if any. 0 throughout the hold, then advancing.
    pub record_index: Option<usize>,
    /// Scale factor for the temperature overlay and frost line opacity.
    pub overlay_scale: f64,
    /// Opacity of the date readout.
    pub date_display_value: f64,
    /// Envelope value per named cue.
    pub cue_values: BTreeMap<String, f64>,
}

/// Complete timing plan for a scroll-driven section animation.
///
/// All positions are units on a single master timeline: annotation cues
/// first, then a hold on the first record, then record playback. Every query
/// is a pure function of the timeline position, which is what makes fast or
/// backwards scrubbing safe.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    cues: BTreeMap<String, SetupCue>,
    hold: HoldPhase,
    playback: PlaybackPhase,
}

impl Schedule {
    pub fn new(
        cues: BTreeMap<String, SetupCue>,
        hold: HoldPhase,
        playback: PlaybackPhase,
    ) -> Result<Self, ScheduleError> {
        for (name, cue) in &cues {
            let finite = cue.reveal_at.is_finite()
                && cue.transition.is_finite()
                && cue.hide_at.map_or(true, |h| h.is_finite());
            if !finite {
                return Err(ScheduleError::NonFiniteCue { cue: name.clone() });
            }
            if cue.transition < 0.0 {
                return Err(ScheduleError::NegativeTransition { cue: name.clone() });
            }
            if let Some(hide_at) = cue.hide_at {
                if hide_at <= cue.reveal_at {
                    return Err(ScheduleError::HideBeforeReveal { cue: name.clone() });
                }
            }
        }

        let timings = [
            hold.start_at,
            hold.duration,
            hold.fade_out,
            playback.start_at,
            playback.per_record,
            playback.reveal_transition,
        ];
        if timings.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ScheduleError::InvalidPhase);
        }
        if hold.fade_out > hold.duration {
            return Err(ScheduleError::FadeOutExceedsHold);
        }
        if playback.per_record <= 0.0 {
            return Err(ScheduleError::NonPositiveAdvance);
        }
        if playback.start_at < hold.end() {
            return Err(ScheduleError::PlaybackBeforeHoldEnd);
        }

        Ok(Self {
            cues,
            hold,
            playback,
        })
    }

    pub fn cues(&self) -> &BTreeMap<String, SetupCue> {
        &self.cues
    }

    pub fn hold(&self) -> HoldPhase {
        self.hold
    }

    pub fn playback(&self) -> PlaybackPhase {
        self.playback
    }

    pub fn phase(&self, t: Progress) -> Phase {
        if t.0 >= self.playback.start_at {
            Phase::Playback
        } else if t.0 >= self.hold.start_at {
            Phase::Hold
        } else {
            Phase::Intro
        }
    }

    /// Which record is on screen at `t`.
    ///
    /// The hold shows record 0. Playback starts at record 1 and advances one
    /// record every `per_record` units, clamping at the final record so
    /// scrolling past the end freezes the last frame.
    pub fn record_index(&self, t: Progress, record_count: usize) -> Option<usize> {
        if record_count == 0 {
            return None;
        }
        match self.phase(t) {
            Phase::Intro => None,
            Phase::Hold => Some(0),
            Phase::Playback => {
                let advanced = ((t.0 - self.playback.start_at) / self.playback.per_record).floor();
                let index = 1usize.saturating_add(advanced as usize);
                Some(index.min(record_count - 1))
            }
        }
    }

    /// Opacity scale for the temperature overlay and frost line.
    ///
    /// Full while the hold shows the first record, fading to zero over the
    /// hold's final `fade_out` units, dark until playback, then full again.
    pub fn overlay_scale(&self, t: Progress) -> f64 {
        if t.0 >= self.playback.start_at {
            return 1.0;
        }
        if t.0 < self.hold.start_at {
            return 0.0;
        }
        let fade_start = self.hold.fade_start();
        if t.0 < fade_start {
            return 1.0;
        }
        if t.0 >= self.hold.end() {
            return 0.0;
        }
        1.0 - (t.0 - fade_start) / self.hold.fade_out
    }

    /// Opacity of the date readout, fading in as playback begins.
    pub fn date_display_value(&self, t: Progress) -> f64 {
        ProgressSpan::starting_at(self.playback.start_at, self.playback.reveal_transition)
            .fraction_through(t)
    }

    pub fn sample(&self, t: Progress, record_count: usize) -> ScheduleSample {
        let cue_values = self
            .cues
            .iter()
            .map(|(name, cue)| (name.clone(), cue.value_at(t)))
            .collect();
        ScheduleSample {
            phase: self.phase(t),
            record_index: self.record_index(t, record_count),
            overlay_scale: self.overlay_scale(t),
            date_display_value: self.date_display_value(t),
            cue_values,
        }
    }

    /// Timeline length in units for a playback sequence of `record_count`.
    pub fn total_duration(&self, record_count: usize) -> f64 {
        self.playback.start_at + record_count as f64 * self.playback.per_record
    }
}
