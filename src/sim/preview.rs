//! Title-screen demo trajectories
//!
//! Two meteoroids are launched on mirrored paths and pre-simulated for a full
//! history buffer so the title screen can show complete orbit trails.

use glam::DVec2;

use super::physics::Attractor;
use super::state::{Meteoroid, ORBIT_HISTORY_LEN};
use crate::polar_to_cartesian;

const PREVIEW_OFFSET: DVec2 = DVec2::new(180.0, 51.0);
const PREVIEW_SPEED: f64 = 0.6;

/// The two title-screen meteoroids, already advanced `ORBIT_HISTORY_LEN` ticks
pub fn title_meteoroids(attractor: &Attractor) -> [Meteoroid; 2] {
    use std::f64::consts::FRAC_PI_4;

    let mut meteoroids = [
        Meteoroid::new(
            attractor.pos - PREVIEW_OFFSET,
            polar_to_cartesian(PREVIEW_SPEED, -FRAC_PI_4),
        ),
        Meteoroid::new(
            attractor.pos + PREVIEW_OFFSET,
            polar_to_cartesian(PREVIEW_SPEED, 3.0 * FRAC_PI_4),
        ),
    ];

    for _ in 0..ORBIT_HISTORY_LEN {
        for m in &mut meteoroids {
            m.age += 1;
            m.history.record(m.age, m.pos);
            m.vel += attractor.velocity_delta(m.pos);
            m.pos += m.vel;
        }
    }

    meteoroids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::ATTRACTOR;

    #[test]
    fn test_preview_fills_history() {
        let preview = title_meteoroids(&ATTRACTOR);
        for m in &preview {
            assert_eq!(m.age, ORBIT_HISTORY_LEN as u64);
            assert_eq!(m.trail().count(), ORBIT_HISTORY_LEN);
            assert!(m.pos.is_finite());
        }
    }

    #[test]
    fn test_preview_is_point_symmetric() {
        let [a, b] = title_meteoroids(&ATTRACTOR);
        let mirrored = ATTRACTOR.pos * 2.0 - b.pos;
        assert!(a.pos.distance(mirrored) < 1e-3);
    }
}
