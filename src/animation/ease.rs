/// Progress curve for the slide-in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    #[default]
    Linear,
    /// Fast entry that settles into place (cubic).
    Decelerate,
    /// Slow start and slow finish (smoothstep).
    Smooth,
}

impl Ease {
    /// Eased progress for `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate => {
                let rest = 1.0 - t;
                1.0 - rest * rest * rest
            }
            Self::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}
