//! Damped-spring easing (§4.A). Parameterized by stiffness `k`, damping
//! `c`, and mass `m`; produces a progress curve that approaches `1` as
//! `t -> infinity`.

/// A damped spring progress function.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    omega0: f64,
    zeta: f64,
}

impl Spring {
    /// Build a spring from stiffness, damping, and mass.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        let mass = mass.max(1e-9);
        let omega0 = (stiffness.max(0.0) / mass).sqrt();
        let zeta = damping.max(0.0) / (2.0 * (stiffness.max(0.0) * mass).sqrt()).max(1e-9);
        Self { omega0, zeta }
    }

    /// Evaluate progress at time `t` (seconds since the spring was released).
    pub fn value(self, t: f64) -> f64 {
        let t = t.max(0.0);
        if self.omega0 <= 0.0 {
            return 1.0;
        }
        if self.zeta < 1.0 {
            let wd = self.omega0 * (1.0 - self.zeta * self.zeta).sqrt();
            let decay = (-self.zeta * self.omega0 * t).exp();
            1.0 - decay * ((wd * t).cos() + (self.zeta * self.omega0 / wd) * (wd * t).sin())
        } else {
            1.0 - (1.0 + self.omega0 * t) * (-self.omega0 * t).exp()
        }
    }
}
