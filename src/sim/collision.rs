//! Wall and bubble-contact detection
//!
//! Two pure predicates drive everything: an inclusive bounds test against the
//! playfield walls, and a circle-overlap test (center distance <= radius sum,
//! so circles just touching count as a hit).

use glam::Vec2;

use super::circle::Circle;
use crate::normalize_heading;

/// Which walls a circle currently touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallContact {
    #[inline]
    pub fn any(self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Test a circle against the playfield bounds (touching counts)
pub fn wall_contact(circle: Circle, width: i32, height: i32) -> WallContact {
    let r = circle.radius() as f32;
    WallContact {
        left: circle.center.x - r <= 0.0,
        right: circle.center.x + r >= width as f32,
        top: circle.center.y - r <= 0.0,
        bottom: circle.center.y + r >= height as f32,
    }
}

/// New heading after bouncing off the touched walls
///
/// Left/right walls map a heading to `360 - h`, top/bottom to `180 - h`.
/// Both reflections apply independently on a corner hit; the composition is
/// the same in either order (`180 + h` mod 360), so no ordering policy is
/// needed.
pub fn reflect_heading(heading: i32, contact: WallContact) -> i32 {
    let mut heading = heading;
    if contact.left || contact.right {
        heading = 360 - heading;
    }
    if contact.top || contact.bottom {
        heading = 180 - heading;
    }
    normalize_heading(heading)
}

/// Whether two circles overlap or touch
pub fn circles_overlap(a: Circle, b: Circle) -> bool {
    let total = (a.radius() + b.radius()) as f32;
    a.center.distance(b.center) <= total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(x: f32, y: f32, r: i32) -> Circle {
        Circle::new(Vec2::new(x, y), r)
    }

    #[test]
    fn test_wall_contact_is_boundary_inclusive() {
        // center.x + radius == width counts as a hit
        let c = circle(628.0, 100.0, 12);
        let contact = wall_contact(c, 640, 480);
        assert!(contact.right);
        assert!(!contact.left && !contact.top && !contact.bottom);
    }

    #[test]
    fn test_wall_contact_clear_in_open_field() {
        let c = circle(320.0, 240.0, 12);
        assert!(!wall_contact(c, 640, 480).any());
    }

    #[test]
    fn test_wall_contact_left_and_top_edges() {
        let contact = wall_contact(circle(12.0, 12.0, 12), 640, 480);
        assert!(contact.left);
        assert!(contact.top);
        assert!(!contact.right && !contact.bottom);
    }

    #[test]
    fn test_reflect_right_wall() {
        // Heading 0 (moving right) maps through 360 - 0 and normalizes to 0
        let contact = WallContact {
            right: true,
            ..Default::default()
        };
        assert_eq!(reflect_heading(0, contact), 0);
        assert_eq!(reflect_heading(45, contact), 315);
        assert_eq!(reflect_heading(315, contact), 45);
    }

    #[test]
    fn test_reflect_bottom_wall() {
        let contact = WallContact {
            bottom: true,
            ..Default::default()
        };
        assert_eq!(reflect_heading(45, contact), 135);
        // 180 - 270 is negative and must normalize
        assert_eq!(reflect_heading(270, contact), 270);
        assert_eq!(reflect_heading(200, contact), 340);
    }

    #[test]
    fn test_reflect_corner_applies_both_axes() {
        let corner = WallContact {
            right: true,
            bottom: true,
            ..Default::default()
        };
        // Both reflections compose to 180 + h
        assert_eq!(reflect_heading(45, corner), 225);
        assert_eq!(reflect_heading(300, corner), 120);
    }

    #[test]
    fn test_no_contact_leaves_heading_alone() {
        assert_eq!(reflect_heading(123, WallContact::default()), 123);
    }

    #[test]
    fn test_overlap_touching_counts() {
        // Centers 20 apart, radii sum 24
        assert!(circles_overlap(circle(100.0, 100.0, 12), circle(120.0, 100.0, 12)));
        // Exactly touching: distance 24 == sum 24
        assert!(circles_overlap(circle(100.0, 100.0, 12), circle(124.0, 100.0, 12)));
        // One pixel apart
        assert!(!circles_overlap(circle(100.0, 100.0, 12), circle(125.0, 100.0, 12)));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -800.0f32..800.0, ay in -800.0f32..800.0,
            bx in -800.0f32..800.0, by in -800.0f32..800.0,
            ar in 0i32..100, br in 0i32..100,
        ) {
            let a = circle(ax, ay, ar);
            let b = circle(bx, by, br);
            prop_assert_eq!(circles_overlap(a, b), circles_overlap(b, a));
        }

        #[test]
        fn reflected_heading_stays_in_range(
            h in -720i32..720,
            left in any::<bool>(), right in any::<bool>(),
            top in any::<bool>(), bottom in any::<bool>(),
        ) {
            let contact = WallContact { left, right, top, bottom };
            let reflected = reflect_heading(h, contact);
            prop_assert!((0..360).contains(&reflected));
        }
    }
}
