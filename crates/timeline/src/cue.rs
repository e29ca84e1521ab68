use foundation::progress::{Progress, ProgressSpan};

/// A reveal/hide envelope for one presentation element.
///
/// Values ramp linearly from 0 to 1 across the reveal transition and, when a
/// hide position is set, back down to 0 across the same transition length
/// starting there. Sampling is a pure function of the timeline position, so
/// scrubbing backwards retraces exactly the values seen on the way in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SetupCue {
    pub reveal_at: f64,
    pub hide_at: Option<f64>,
    pub transition: f64,
}

impl SetupCue {
    pub fn reveal(reveal_at: f64, transition: f64) -> Self {
        Self {
            reveal_at,
            hide_at: None,
            transition,
        }
    }

    pub fn reveal_then_hide(reveal_at: f64, hide_at: f64, transition: f64) -> Self {
        Self {
            reveal_at,
            hide_at: Some(hide_at),
            transition,
        }
    }

    /// Envelope value at `t`, in `0.0..=1.0`.
    pub fn value_at(&self, t: Progress) -> f64 {
        let rising =
            ProgressSpan::starting_at(self.reveal_at, self.transition).fraction_through(t);
        let falling = match self.hide_at {
            Some(hide_at) => {
                ProgressSpan::starting_at(hide_at, self.transition).fraction_through(t)
            }
            None => 0.0,
        };
        rising * (1.0 - falling)
    }
}

#[cfg(test)]
mod tests {
    use super::SetupCue;
    use foundation::progress::Progress;

    #[test]
    fn reveal_ramp_is_linear_and_clamped() {
        let cue = SetupCue::reveal(10.0, 5.0);
        assert_eq!(cue.value_at(Progress(0.0)), 0.0);
        assert_eq!(cue.value_at(Progress(10.0)), 0.0);
        assert_eq!(cue.value_at(Progress(12.5)), 0.5);
        assert_eq!(cue.value_at(Progress(15.0)), 1.0);
        assert_eq!(cue.value_at(Progress(100.0)), 1.0);
    }

    #[test]
    fn hide_ramp_returns_to_zero() {
        let cue = SetupCue::reveal_then_hide(15.0, 35.0, 5.0);
        assert_eq!(cue.value_at(Progress(20.0)), 1.0);
        assert_eq!(cue.value_at(Progress(35.0)), 1.0);
        assert_eq!(cue.value_at(Progress(37.5)), 0.5);
        assert_eq!(cue.value_at(Progress(40.0)), 0.0);
        assert_eq!(cue.value_at(Progress(60.0)), 0.0);
    }

    #[test]
    fn instant_reveal_steps_at_its_position() {
        let cue = SetupCue::reveal(20.0, 0.0);
        assert_eq!(cue.value_at(Progress(19.999)), 0.0);
        assert_eq!(cue.value_at(Progress(20.0)), 1.0);
    }

    #[test]
    fn scrubbing_back_retraces_the_same_values() {
        let cue = SetupCue::reveal_then_hide(0.0, 10.0, 5.0);
        let early = cue.value_at(Progress(2.5));
        let _ = cue.value_at(Progress(50.0));
        assert_eq!(cue.value_at(Progress(2.5)), early);
    }
}
