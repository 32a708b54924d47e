#![forbid(unsafe_code)]

//! Collision detection: which drop target the drag is over.
//!
//! The strategy depends on what is being dragged:
//!
//! - **Containers** use [`rect_intersection`]: the container target whose
//!   overlap with the dragged rectangle (intersection over union) is largest
//!   wins. If nothing overlaps, [`pointer_within`] picks the container under
//!   the pointer. Only container targets are candidates.
//! - **Items** use [`closest_center`] over the targets the drag touches
//!   (the dragged rectangle overlaps them or the pointer is inside them),
//!   items and containers alike. A drag over empty space has no target.
//!
//! Ties go to the earliest target in the slice. Zero-area targets are never
//! candidates.

use tray_core::geometry::Rect;
use tray_core::semantic_event::Position;

use crate::id::{DragId, DragKind};

/// A registered drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub id: DragId,
    pub rect: Rect,
}

impl DropTarget {
    pub fn new(id: DragId, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// How candidates are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStrategy {
    /// Largest overlap, falling back to pointer containment. Containers only.
    RectIntersection,
    /// Nearest center among the targets under the drag.
    ClosestCenter,
}

impl CollisionStrategy {
    /// The strategy used for a given drag source.
    pub fn for_active(active: &DragId) -> Self {
        match active.kind {
            DragKind::Container => Self::RectIntersection,
            DragKind::Item => Self::ClosestCenter,
        }
    }

    /// Resolve the target under the drag, if any.
    pub fn detect<'a>(
        self,
        dragged: Rect,
        pointer: Position,
        targets: &'a [DropTarget],
    ) -> Option<&'a DropTarget> {
        match self {
            Self::RectIntersection => {
                let containers = || targets.iter().filter(|t| t.id.is_container());
                rect_intersection(dragged, containers())
                    .or_else(|| pointer_within(pointer, containers()))
            }
            Self::ClosestCenter => closest_center(
                dragged,
                targets.iter().filter(|t| touches(dragged, pointer, t)),
            ),
        }
    }
}

/// Whether the drag is over `target` at all.
fn touches(dragged: Rect, pointer: Position, target: &DropTarget) -> bool {
    dragged.intersection_opt(&target.rect).is_some() || target.rect.contains(pointer.x, pointer.y)
}

/// Resolve the target for `active` using its strategy.
pub fn detect_collision<'a>(
    active: &DragId,
    dragged: Rect,
    pointer: Position,
    targets: &'a [DropTarget],
) -> Option<&'a DropTarget> {
    CollisionStrategy::for_active(active).detect(dragged, pointer, targets)
}

/// Intersection over union of two rectangles, in `[0, 1]`.
pub fn intersection_ratio(a: Rect, b: Rect) -> f64 {
    let overlap = a.intersection(&b).area();
    if overlap == 0 {
        return 0.0;
    }
    let union = a.area() + b.area() - overlap;
    f64::from(overlap) / f64::from(union)
}

/// The target with the largest overlap ratio, if any overlaps at all.
pub fn rect_intersection<'a>(
    dragged: Rect,
    targets: impl IntoIterator<Item = &'a DropTarget>,
) -> Option<&'a DropTarget> {
    let mut best: Option<(&DropTarget, f64)> = None;
    for target in targets {
        if target.rect.is_empty() {
            continue;
        }
        let ratio = intersection_ratio(dragged, target.rect);
        if ratio > 0.0 && best.is_none_or(|(_, r)| ratio > r) {
            best = Some((target, ratio));
        }
    }
    best.map(|(t, _)| t)
}

/// The first target containing the pointer.
pub fn pointer_within<'a>(
    pointer: Position,
    targets: impl IntoIterator<Item = &'a DropTarget>,
) -> Option<&'a DropTarget> {
    targets
        .into_iter()
        .find(|t| !t.rect.is_empty() && t.rect.contains(pointer.x, pointer.y))
}

/// The target whose center is nearest the dragged rectangle's center.
pub fn closest_center<'a>(
    dragged: Rect,
    targets: impl IntoIterator<Item = &'a DropTarget>,
) -> Option<&'a DropTarget> {
    let mut best: Option<(&DropTarget, f64)> = None;
    for target in targets {
        if target.rect.is_empty() {
            continue;
        }
        let distance = dragged.center_distance(&target.rect);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((target, distance));
        }
    }
    best.map(|(t, _)| t)
}
