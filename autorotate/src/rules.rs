//! The rotation rule table: how orientation angles map to rotations.
//!
//! The 360° orientation circle is carved into four primary sectors, one per
//! rotation. The boundary between adjacent sectors is owned by a transition
//! zone whose switching threshold slides with device tilt and depends on
//! the previously committed rotation; the gap between its enter and leave
//! thresholds is the hysteresis that keeps a device resting on a boundary
//! from toggling. Two continuation rules layered on top keep a fast
//! landscape-to-landscape flip from bouncing through portrait.
//!
//! Rules are evaluated in the fixed order of [`RULES`] and the last
//! applicable rule wins. The continuation rules deliberately shadow the
//! transition zones over [46, 134] and [226, 314]; a test per rule pins
//! each covered range and the shadowing.

use crate::rotation::Rotation;

/// Tilt below which no rotation decision is made (degrees).
pub const TILT_PIVOT_LOWER: f32 = -10.0;

/// The sweet-spot tilt all thresholds are anchored at (degrees).
pub const TILT_PIVOT: f32 = 20.0;

/// Tilt above which no rotation decision is made (degrees).
pub const TILT_PIVOT_UPPER: f32 = 65.0;

/// Whether a tilt angle supports a rotation decision at all. The gate
/// is inclusive at both ends.
pub fn tilt_in_gate(tilt: f32) -> bool {
    (TILT_PIVOT_LOWER..=TILT_PIVOT_UPPER).contains(&tilt)
}

/// Slide a threshold from `base` toward `limit` as tilt departs the pivot.
///
/// `delta` is tilt minus [`TILT_PIVOT`]. At `delta = 0` the threshold sits
/// at `base`; each side of the pivot has its own slope, chosen so the
/// threshold lands exactly on `limit` at the matching tilt gate edge
/// (`delta = -30` below, `+45` above). Within the gate the result never
/// leaves the `base..limit` span.
fn slide(base: f32, limit: f32, delta: f32) -> f32 {
    let span = limit - base;
    if delta < 0.0 {
        base - span * delta / (TILT_PIVOT - TILT_PIVOT_LOWER)
    } else {
        base + span * delta / (TILT_PIVOT_UPPER - TILT_PIVOT)
    }
}

/// The sector an orientation falls in with no history and no tilt shift:
/// [315, 45) → `Deg0`, [45, 135) → `Deg270`, [135, 225) → `Deg180`,
/// [225, 315) → `Deg90`.
///
/// A quarter turn clockwise lands at orientation 90, which the display
/// compensates with `Deg270` content rotation, and so on around the circle.
pub fn primary_sector(orientation: f32) -> Rotation {
    if (45.0..135.0).contains(&orientation) {
        Rotation::Deg270
    } else if (135.0..225.0).contains(&orientation) {
        Rotation::Deg180
    } else if (225.0..315.0).contains(&orientation) {
        Rotation::Deg90
    } else {
        Rotation::Deg0
    }
}

/// A quarter-circle zone owning the boundary between two adjacent
/// rotations.
///
/// `low` owns the low-angle end of `range`. With the previous rotation
/// equal to `low` the zone decides whether to leave it: the `leave_low`
/// threshold slides toward the top of the range as tilt departs the pivot.
/// In every other state it decides whether to enter `low`: the `enter_low`
/// threshold slides toward the bottom of the range. `leave_low` sits above
/// `enter_low`, so between them lies a dead band where either rotation is
/// stable.
#[derive(Debug, Clone, Copy)]
pub struct TransitionZone {
    /// Inclusive orientation range this zone covers, in whole degrees.
    pub range: (f32, f32),
    /// Rotation owning the low-angle end of the range.
    pub low: Rotation,
    /// Rotation owning the high-angle end of the range.
    pub high: Rotation,
    /// Threshold for leaving `low`, at pivot tilt.
    pub leave_low: f32,
    /// Threshold for entering `low`, at pivot tilt.
    pub enter_low: f32,
}

impl TransitionZone {
    fn covers(&self, orientation: f32) -> bool {
        orientation >= self.range.0 && orientation <= self.range.1
    }

    fn decide(&self, orientation: f32, delta: f32, prev: Option<Rotation>) -> Rotation {
        if prev == Some(self.low) {
            let threshold = slide(self.leave_low, self.range.1, delta);
            if orientation >= threshold {
                self.high
            } else {
                self.low
            }
        } else {
            let threshold = slide(self.enter_low, self.range.0, delta);
            if orientation <= threshold {
                self.low
            } else {
                self.high
            }
        }
    }
}

/// Extra stickiness for a direct landscape-to-landscape flip.
///
/// Applies only while the previous rotation is `from`. Inside `range` it
/// proposes either `from` or the opposite landscape `to`, never portrait,
/// so a fast 180° flip between the two landscape holds cannot bounce
/// through a portrait commit. Continuation rules come after the transition
/// zones in the table and override them wherever the ranges overlap.
#[derive(Debug, Clone, Copy)]
pub struct ContinuationRule {
    /// Previous rotation this rule is conditioned on.
    pub from: Rotation,
    /// The opposite landscape rotation proposed past the threshold.
    pub to: Rotation,
    /// Inclusive orientation range this rule covers, in whole degrees.
    pub range: (f32, f32),
    /// Switching threshold at pivot tilt.
    pub base: f32,
    /// Range end the threshold slides toward as tilt departs the pivot.
    pub limit: f32,
    /// True when `to` is proposed at orientations at or above the
    /// threshold, false when at or below.
    pub switch_above: bool,
}

impl ContinuationRule {
    fn covers(&self, orientation: f32) -> bool {
        orientation >= self.range.0 && orientation <= self.range.1
    }

    fn decide(&self, orientation: f32, delta: f32) -> Rotation {
        let threshold = slide(self.base, self.limit, delta);
        let past = if self.switch_above {
            orientation >= threshold
        } else {
            orientation <= threshold
        };
        if past {
            self.to
        } else {
            self.from
        }
    }
}

/// One entry in the ordered rule table.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Boundary zone between two adjacent rotations.
    Transition(TransitionZone),
    /// Landscape-to-landscape continuation.
    Continuation(ContinuationRule),
}

impl Rule {
    /// Candidate rotation if this rule applies to the sample, else `None`.
    pub fn apply(&self, orientation: f32, delta: f32, prev: Option<Rotation>) -> Option<Rotation> {
        match self {
            Rule::Transition(zone) => zone
                .covers(orientation)
                .then(|| zone.decide(orientation, delta, prev)),
            Rule::Continuation(rule) => (prev == Some(rule.from) && rule.covers(orientation))
                .then(|| rule.decide(orientation, delta)),
        }
    }
}

/// The rule table, evaluated in order with the last applicable rule
/// winning.
pub const RULES: [Rule; 6] = [
    // Deg90 <-> Deg0 boundary (primary edge at 315).
    Rule::Transition(TransitionZone {
        range: (270.0, 359.0),
        low: Rotation::Deg90,
        high: Rotation::Deg0,
        leave_low: 320.0,
        enter_low: 295.0,
    }),
    // Deg0 <-> Deg270 boundary (primary edge at 45).
    Rule::Transition(TransitionZone {
        range: (1.0, 90.0),
        low: Rotation::Deg0,
        high: Rotation::Deg270,
        leave_low: 65.0,
        enter_low: 40.0,
    }),
    // Deg270 <-> Deg180 boundary (primary edge at 135).
    Rule::Transition(TransitionZone {
        range: (91.0, 180.0),
        low: Rotation::Deg270,
        high: Rotation::Deg180,
        leave_low: 155.0,
        enter_low: 130.0,
    }),
    // Deg180 <-> Deg90 boundary (primary edge at 225).
    Rule::Transition(TransitionZone {
        range: (181.0, 270.0),
        low: Rotation::Deg180,
        high: Rotation::Deg90,
        leave_low: 230.0,
        enter_low: 205.0,
    }),
    // Flip continuation across the upright portrait sector.
    Rule::Continuation(ContinuationRule {
        from: Rotation::Deg90,
        to: Rotation::Deg270,
        range: (46.0, 134.0),
        base: 65.0,
        limit: 134.0,
        switch_above: true,
    }),
    // Flip continuation across the inverted portrait sector.
    Rule::Continuation(ContinuationRule {
        from: Rotation::Deg270,
        to: Rotation::Deg90,
        range: (226.0, 314.0),
        base: 295.0,
        limit: 226.0,
        switch_above: false,
    }),
];

/// Resolve one sample's candidate rotation.
///
/// Starts from the primary sector, then lets every applicable rule in
/// table order replace the candidate. Total for any finite input; history
/// enters only through `prev`.
pub fn resolve(orientation: f32, delta: f32, prev: Option<Rotation>) -> Rotation {
    let mut candidate = primary_sector(orientation);
    for rule in &RULES {
        if let Some(rotation) = rule.apply(orientation, delta, prev) {
            candidate = rotation;
        }
    }
    candidate
}
