/// Easing curves mapping normalized time `t` in \[0, 1\] to eased progress.
///
/// The power family follows the usual tween-library convention:
/// `PowerNOut(t) = 1 - (1 - t)^(N + 1)` and `PowerNIn(t) = t^(N + 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    Power1Out,
    Power2Out,
    Power3Out,
    Power3In,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::Power3In => t.powi(4),
        }
    }
}
