use crate::coords::{Rect, Vec2};

/// Rounded-rectangle clip region in logical pixels.
///
/// `rect` is already intersected with every enclosing region. `radius` is the
/// corner radius of the innermost region and is clamped to `rect`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipRegion {
    pub rect: Rect,
    pub radius: f32,
}

impl ClipRegion {
    /// A rect with a zero or negative extent admits nothing.
    #[inline]
    pub fn new(rect: Rect, radius: f32) -> Self {
        if rect.is_empty() {
            return Self::empty();
        }
        Self { radius: rect.clamp_radius(radius), rect }
    }

    /// Region that admits nothing. Produced when nested clips do not overlap.
    #[inline]
    pub fn empty() -> Self {
        Self { rect: Rect::new(0.0, 0.0, 0.0, 0.0), radius: 0.0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Narrows `self` by a child region.
    pub fn intersect(&self, child: ClipRegion) -> ClipRegion {
        match self.rect.intersect(child.rect) {
            Some(rect) => ClipRegion::new(rect, child.radius),
            None => ClipRegion::empty(),
        }
    }

    /// CPU reference of the coverage test the shaders run per fragment.
    pub fn contains(&self, p: Vec2) -> bool {
        if !self.rect.contains_inclusive(p) {
            return false;
        }
        let r = self.radius;
        if r <= 0.0 {
            return true;
        }
        let min = self.rect.min();
        let max = self.rect.max();
        let cx = p.x.clamp(min.x + r, max.x - r);
        let cy = p.y.clamp(min.y + r, max.y - r);
        let dx = p.x - cx;
        let dy = p.y - cy;
        dx * dx + dy * dy <= r * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_clamped_to_rect() {
        let c = ClipRegion::new(Rect::new(0.0, 0.0, 10.0, 100.0), 40.0);
        assert_eq!(c.radius, 5.0);
    }

    #[test]
    fn corner_is_outside_rounded_region() {
        let c = ClipRegion::new(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0);
        assert!(!c.contains(Vec2::new(0.5, 0.5)));
        assert!(c.contains(Vec2::new(10.0, 0.5)));
        assert!(c.contains(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn negative_extent_admits_nothing() {
        let c = ClipRegion::new(Rect::new(100.0, 100.0, -50.0, 30.0), 4.0);
        assert!(c.is_empty());
        assert!(!c.contains(Vec2::new(75.0, 110.0)));
        let parent = ClipRegion::new(Rect::new(0.0, 0.0, 500.0, 500.0), 0.0);
        assert!(parent.intersect(c).is_empty());
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = ClipRegion::new(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0);
        let b = ClipRegion::new(Rect::new(20.0, 20.0, 10.0, 10.0), 0.0);
        assert!(a.intersect(b).is_empty());
    }

    #[test]
    fn intersection_keeps_child_radius() {
        let a = ClipRegion::new(Rect::new(0.0, 0.0, 100.0, 100.0), 2.0);
        let b = ClipRegion::new(Rect::new(50.0, 50.0, 100.0, 100.0), 8.0);
        let c = a.intersect(b);
        assert_eq!(c.rect, Rect::new(50.0, 50.0, 50.0, 50.0));
        assert_eq!(c.radius, 8.0);
    }
}
