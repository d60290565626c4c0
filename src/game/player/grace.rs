// Post-damage invincibility window
//
// Frame-counted, single-shot. While the window is open the player's
// body is held out of the physics world, so no collision response (and
// no further damage) is possible until the timer runs out.

/// Sprite opacity while the window is open
pub const GRACE_ALPHA: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct GraceTimer {
    active: bool,
    elapsed: u32,
    period: u32,
}

impl GraceTimer {
    pub fn new(period: u32) -> Self {
        Self {
            active: false,
            elapsed: 0,
            period,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Open the window. Taking damage while it is already open restarts
    /// the count from zero.
    pub fn enter(&mut self) {
        self.active = true;
        self.elapsed = 0;
    }

    /// Advance one tick. Returns true on the tick the window closes;
    /// the caller re-inserts the body and restores sprite alpha then.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed > self.period {
            self.active = false;
            self.elapsed = 0;
            return true;
        }
        false
    }
}
