/// Default length of a smooth scroll (ms).
pub const DEFAULT_DURATION_MS: f64 = 400.0;

/// Animated scroll for hosts without a native smooth-scroll primitive.
///
/// Eases out (cubic) from the start offset to the target. Retargeting while
/// in flight restarts the easing from the current position, which is how
/// browsers redirect an in-progress smooth scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    from: f64,
    to: f64,
    elapsed_ms: f64,
    duration_ms: f64,
}

impl SmoothScroll {
    pub fn start(from: f64, to: f64) -> Self {
        Self::with_duration(from, to, DEFAULT_DURATION_MS)
    }

    pub fn with_duration(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms: duration_ms.max(0.0),
        }
    }

    pub fn position(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed_ms / self.duration_ms;
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Advance the animation and return the new position.
    pub fn tick(&mut self, dt_ms: f64) -> f64 {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
        self.position()
    }

    pub fn retarget(&mut self, to: f64) {
        self.from = self.position();
        self.to = to;
        self.elapsed_ms = 0.0;
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target() {
        let mut anim = SmoothScroll::start(0.0, 1000.0);
        let mut last = 0.0;
        for _ in 0..10 {
            let pos = anim.tick(50.0);
            assert!(pos >= last, "position went backwards");
            last = pos;
        }
        assert!(anim.is_finished());
        assert_eq!(anim.position(), 1000.0);
    }

    #[test]
    fn eases_out() {
        let mut anim = SmoothScroll::start(0.0, 1000.0);
        // Cubic ease-out covers 87.5% of the distance in the first half.
        assert!((anim.tick(200.0) - 875.0).abs() < 1e-9);
    }

    #[test]
    fn retarget_continues_from_current_position() {
        let mut anim = SmoothScroll::start(0.0, 1000.0);
        let mid = anim.tick(200.0);
        anim.retarget(200.0);
        assert!(!anim.is_finished());
        assert!((anim.position() - mid).abs() < 1e-9);
        anim.tick(DEFAULT_DURATION_MS);
        assert_eq!(anim.position(), 200.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let anim = SmoothScroll::with_duration(10.0, 90.0, 0.0);
        assert!(anim.is_finished());
        assert_eq!(anim.position(), 90.0);
    }
}
