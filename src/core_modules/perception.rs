// THEORY:
// The `perception` module turns a stream of boolean visibility samples into a
// stable analog signal. Raw cone tests flicker — a target grazing the cone
// edge flips between visible and not on consecutive frames — so each watch
// pair carries a perception accumulator in [0, 1] that the tick driver feeds
// one sample per frame.
//
// The integrator is deliberately asymmetric: capture and loss ramp at
// independently configured rates, so an embedding game can make an observer
// notice instantly but forget slowly, or the reverse. A non-positive rate is
// the instantaneous case — a single sample slams the accumulator to the
// matching bound regardless of frame duration.
//
// The discrete state machine layered on top (in the tick driver) only reacts
// when the accumulator saturates at 0 or 1, which is what gives the engine
// its hysteresis: a target must hold visibility long enough to be captured,
// and hold absence long enough to be lost.

use crate::core_modules::watch_pair::WatchPair;

pub mod perception {
    use super::*;

    /// Feeds one visibility sample into the pair's perception accumulator.
    ///
    /// With a positive rate the accumulator moves by `rate * dt` toward the
    /// sample; otherwise it steps the full scale in one tick. The result is
    /// clamped to [0, 1] after every update.
    pub fn integrate(pair: &mut WatchPair, visible: bool, dt: f32) {
        let sign = if visible { 1.0 } else { -1.0 };
        let rate = if visible {
            pair.config.capture_rate
        } else {
            pair.config.lose_rate
        };

        let delta = if rate > 0.0 { rate * dt * sign } else { sign };

        pair.perception = (pair.perception + delta).clamp(0.0, 1.0);
    }
}
