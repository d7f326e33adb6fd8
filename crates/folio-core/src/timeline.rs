//! Keyframe timeline interpreter.
//!
//! A timeline is a set of independent tracks, one per animated channel
//! (target object + property). Each track holds an initial value and a list
//! of non-overlapping segments in progress space. Sampling is a pure function
//! of progress: every track yields one value, and values are assigned to
//! their channel independently (never summed).

use crate::easing::Easing;
use crate::error::TimelineError;
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Camera,
    Island,
    Ring,
    Particles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel {
    pub target: Target,
    pub property: Property,
}

impl Channel {
    pub const fn new(target: Target, property: Property) -> Self {
        Self { target, property }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}.{:?}", self.target, self.property)
    }
}

/// One authored keyframe: animate `channel` to `value` over `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub channel: Channel,
    pub start: f32,
    pub end: f32,
    pub value: f32,
    pub easing: Easing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Segment {
    start: f32,
    end: f32,
    value: f32,
    easing: Easing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    channel: Channel,
    initial: f32,
    segments: Vec<Segment>,
}

impl Track {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Value at `progress`. Before the first segment the initial value holds;
    /// after a segment ends its end value holds until the next one starts.
    pub fn value_at(&self, progress: f32) -> f32 {
        let mut value = self.initial;
        for seg in &self.segments {
            if progress >= seg.end {
                value = seg.value;
                continue;
            }
            if progress > seg.start {
                let t = (progress - seg.start) / (seg.end - seg.start);
                value += (seg.value - value) * seg.easing.apply(t);
            }
            break;
        }
        value
    }
}

/// Property assignment produced by sampling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assignment {
    pub channel: Channel,
    pub value: f32,
}

pub type Assignments = SmallVec<[Assignment; 16]>;

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
    index: FnvHashMap<Channel, usize>,
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Sample every track. Progress is clamped to \[0, 1\]; NaN reads as 0.
    pub fn sample(&self, progress: f32) -> Assignments {
        let p = clamp_progress(progress);
        self.tracks
            .iter()
            .map(|t| Assignment {
                channel: t.channel,
                value: t.value_at(p),
            })
            .collect()
    }

    pub fn value_at(&self, channel: Channel, progress: f32) -> Option<f32> {
        self.index
            .get(&channel)
            .map(|&i| self.tracks[i].value_at(clamp_progress(progress)))
    }
}

#[inline]
fn clamp_progress(p: f32) -> f32 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Declarative table builder in the style of `timeline.to(target, {..}, at)`.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    initial: Vec<(Channel, f32)>,
    keyframes: Vec<Keyframe>,
}

impl TimelineBuilder {
    /// Declare the resting value of a channel before any segment applies.
    pub fn initial(mut self, target: Target, values: &[(Property, f32)]) -> Self {
        for &(property, v) in values {
            self.initial.push((Channel::new(target, property), v));
        }
        self
    }

    /// Animate several properties of one target over the same interval.
    pub fn to(
        mut self,
        target: Target,
        values: &[(Property, f32)],
        start: f32,
        end: f32,
        easing: Easing,
    ) -> Self {
        for &(property, value) in values {
            self.keyframes.push(Keyframe {
                channel: Channel::new(target, property),
                start,
                end,
                value,
                easing,
            });
        }
        self
    }

    pub fn keyframe(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        self
    }

    pub fn build(self) -> Result<Timeline, TimelineError> {
        let mut by_channel: FnvHashMap<Channel, (f32, Vec<Segment>)> = FnvHashMap::default();
        for (channel, v) in self.initial {
            if !v.is_finite() {
                return Err(TimelineError::NonFiniteValue { channel });
            }
            by_channel.entry(channel).or_insert((v, Vec::new())).0 = v;
        }
        for kf in self.keyframes {
            let channel = kf.channel;
            if !(kf.start.is_finite() && kf.end.is_finite() && kf.value.is_finite()) {
                return Err(TimelineError::NonFiniteValue { channel });
            }
            if kf.start > kf.end {
                return Err(TimelineError::InvertedInterval {
                    channel,
                    start: kf.start,
                    end: kf.end,
                });
            }
            if kf.start < 0.0 || kf.end > 1.0 {
                return Err(TimelineError::IntervalOutOfRange {
                    channel,
                    start: kf.start,
                    end: kf.end,
                });
            }
            let (_, segments) = by_channel
                .get_mut(&channel)
                .ok_or(TimelineError::MissingInitialValue { channel })?;
            segments.push(Segment {
                start: kf.start,
                end: kf.end,
                value: kf.value,
                easing: kf.easing,
            });
        }

        let mut tracks = Vec::with_capacity(by_channel.len());
        for (channel, (initial, mut segments)) in by_channel {
            segments.sort_by(|a, b| a.start.total_cmp(&b.start));
            for pair in segments.windows(2) {
                if pair[1].start < pair[0].end {
                    return Err(TimelineError::OverlappingSegments {
                        channel,
                        start: pair[1].start,
                    });
                }
            }
            tracks.push(Track {
                channel,
                initial,
                segments,
            });
        }
        tracks.sort_by_key(|t| t.channel);
        let index = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.channel, i))
            .collect();
        log::debug!("[timeline] built {} tracks", tracks.len());
        Ok(Timeline { tracks, index })
    }
}
