// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Drag and resize geometry.
//!
//! Pure functions from gesture inputs to a new field box. Every result is
//! at least the minimum field size and lies inside the page.

use super::hit_test::ResizeHandle;
use crate::model::clamp_rect;
use crate::settings;
use kurbo::{Point, Rect, Size, Vec2};

/// New origin for a dragged field: pointer minus the grab offset, kept so
/// the whole box stays on the page.
pub fn drag_origin(pointer: Point, grab_offset: Vec2, size: Size, page: Size) -> Point {
    let x = pointer.x - grab_offset.x;
    let y = pointer.y - grab_offset.y;
    Point::new(
        x.clamp(0.0, (page.width - size.width).max(0.0)),
        y.clamp(0.0, (page.height - size.height).max(0.0)),
    )
}

/// Width/height ratio usable for aspect locking, if `size` has one
pub fn aspect_ratio(size: Size) -> Option<f64> {
    let ratio = size.width / size.height;
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

/// Resize `original` by dragging `handle` by `delta` (document units).
///
/// Edge handles change one dimension and corner handles two. West and
/// north handles move the origin so the opposite edge stays put. Below
/// the minimum size the dimension is clamped and the fixed edge still
/// does not move. With `aspect` (width / height) the dragged dimension
/// drives the other one; edge handles grow the free dimension towards
/// the right or bottom. The page limits how far the moving edges can go.
pub fn resize_rect(
    original: Rect,
    handle: ResizeHandle,
    delta: Vec2,
    page: Size,
    aspect: Option<f64>,
) -> Rect {
    let min = settings::field::MIN_SIZE;

    let mut left = original.x0;
    let mut right = original.x1;
    let mut top = original.y0;
    let mut bottom = original.y1;
    if handle.moves_west() {
        left += delta.x;
    }
    if handle.moves_east() {
        right += delta.x;
    }
    if handle.moves_north() {
        top += delta.y;
    }
    if handle.moves_south() {
        bottom += delta.y;
    }
    let mut width = right - left;
    let mut height = bottom - top;

    // Room between the fixed edge and the page boundary
    let max_width = if handle.moves_west() {
        original.x1
    } else {
        page.width - original.x0
    };
    let max_height = if handle.moves_north() {
        original.y1
    } else {
        page.height - original.y0
    };

    match aspect.filter(|r| r.is_finite() && *r > 0.0) {
        Some(ratio) => {
            let width_drives = match handle {
                ResizeHandle::E | ResizeHandle::W => true,
                ResizeHandle::N | ResizeHandle::S => false,
                _ => {
                    let dw = (width / original.width() - 1.0).abs();
                    let dh = (height / original.height() - 1.0).abs();
                    dw >= dh
                }
            };
            if width_drives {
                height = width / ratio;
            } else {
                width = height * ratio;
            }

            let min_width = min.max(min * ratio);
            if !(width >= min_width) {
                width = min_width;
                height = width / ratio;
            }

            let fit = (max_width / width).min(max_height / height).min(1.0);
            width *= fit;
            height *= fit;
        }
        None => {
            width = width.max(min).min(max_width);
            height = height.max(min).min(max_height);
        }
    }

    let x = if handle.moves_west() {
        original.x1 - width
    } else {
        original.x0
    };
    let y = if handle.moves_north() {
        original.y1 - height
    } else {
        original.y0
    };
    clamp_rect(x, y, width, height, page)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: Size = Size::new(800.0, 600.0);
    const EPS: f64 = 1e-9;

    fn assert_valid(rect: Rect) {
        assert!(rect.x0 >= 0.0 && rect.y0 >= 0.0, "{rect:?}");
        assert!(rect.x1 <= PAGE.width && rect.y1 <= PAGE.height, "{rect:?}");
        assert!(rect.width() >= 20.0 - EPS && rect.height() >= 20.0 - EPS, "{rect:?}");
    }

    #[test]
    fn drag_origin_subtracts_offset() {
        let origin = drag_origin(
            Point::new(200.0, 150.0),
            Vec2::new(10.0, 10.0),
            Size::new(150.0, 40.0),
            PAGE,
        );
        assert_eq!(origin, Point::new(190.0, 140.0));
    }

    #[test]
    fn drag_origin_stays_on_page() {
        let size = Size::new(150.0, 40.0);
        let origin = drag_origin(Point::new(5000.0, -50.0), Vec2::ZERO, size, PAGE);
        assert_eq!(origin, Point::new(650.0, 0.0));
    }

    #[test]
    fn east_handle_changes_width_only() {
        let rect = resize_rect(
            Rect::new(50.0, 50.0, 250.0, 150.0),
            ResizeHandle::E,
            Vec2::new(40.0, 25.0),
            PAGE,
            None,
        );
        assert_eq!(rect, Rect::new(50.0, 50.0, 290.0, 150.0));
    }

    #[test]
    fn west_handle_keeps_right_edge() {
        let rect = resize_rect(
            Rect::new(50.0, 50.0, 250.0, 150.0),
            ResizeHandle::W,
            Vec2::new(30.0, 0.0),
            PAGE,
            None,
        );
        assert_eq!(rect, Rect::new(80.0, 50.0, 250.0, 150.0));
    }

    #[test]
    fn aspect_locked_east_handle() {
        // 2:1 bitmap, width 200 -> 300
        let rect = resize_rect(
            Rect::new(50.0, 50.0, 250.0, 150.0),
            ResizeHandle::E,
            Vec2::new(100.0, 0.0),
            PAGE,
            Some(2.0),
        );
        assert_eq!(rect, Rect::new(50.0, 50.0, 350.0, 200.0));
    }

    #[test]
    fn aspect_locked_north_handle_drives_width() {
        let rect = resize_rect(
            Rect::new(50.0, 100.0, 250.0, 200.0),
            ResizeHandle::N,
            Vec2::new(0.0, -50.0),
            PAGE,
            Some(2.0),
        );
        assert!((rect.height() - 150.0).abs() < EPS);
        assert!((rect.width() - 300.0).abs() < EPS);
        assert_eq!(rect.y1, 200.0);
        assert_eq!(rect.x0, 50.0);
    }

    #[test]
    fn northwest_collapse_pins_fixed_corner() {
        let rect = resize_rect(
            Rect::new(0.0, 0.0, 30.0, 30.0),
            ResizeHandle::NW,
            Vec2::new(500.0, 500.0),
            PAGE,
            None,
        );
        assert_eq!(rect, Rect::new(10.0, 10.0, 30.0, 30.0));
    }

    #[test]
    fn growth_is_limited_by_page() {
        let rect = resize_rect(
            Rect::new(700.0, 500.0, 750.0, 550.0),
            ResizeHandle::SE,
            Vec2::new(500.0, 500.0),
            PAGE,
            None,
        );
        assert_eq!(rect, Rect::new(700.0, 500.0, 800.0, 600.0));
    }

    #[test]
    fn locked_growth_limited_by_page_keeps_ratio() {
        let rect = resize_rect(
            Rect::new(600.0, 50.0, 700.0, 100.0),
            ResizeHandle::E,
            Vec2::new(400.0, 0.0),
            PAGE,
            Some(2.0),
        );
        assert_valid(rect);
        assert!((rect.width() / rect.height() - 2.0).abs() < EPS);
        assert_eq!(rect.x1, 800.0);
    }

    #[test]
    fn locked_shrink_respects_minimum_on_both_axes() {
        let rect = resize_rect(
            Rect::new(100.0, 100.0, 300.0, 200.0),
            ResizeHandle::W,
            Vec2::new(1000.0, 0.0),
            PAGE,
            Some(2.0),
        );
        assert_valid(rect);
        assert!((rect.width() / rect.height() - 2.0).abs() < EPS);
        assert_eq!(rect.x1, 300.0);
    }

    #[test]
    fn every_handle_keeps_invariants() {
        let original = Rect::new(100.0, 100.0, 200.0, 160.0);
        let deltas = [
            Vec2::new(-900.0, -900.0),
            Vec2::new(900.0, 900.0),
            Vec2::new(-95.0, 30.0),
            Vec2::new(7.5, -59.0),
            Vec2::ZERO,
        ];
        for handle in ResizeHandle::ALL {
            for delta in deltas {
                assert_valid(resize_rect(original, handle, delta, PAGE, None));
                let locked = resize_rect(original, handle, delta, PAGE, Some(100.0 / 60.0));
                assert_valid(locked);
                if !handle.is_corner() {
                    let ratio = locked.width() / locked.height();
                    assert!((ratio - 100.0 / 60.0).abs() < 1e-6, "{handle:?} {delta:?}");
                }
            }
        }
    }

    #[test]
    fn zero_delta_is_identity() {
        let original = Rect::new(100.0, 100.0, 200.0, 160.0);
        for handle in ResizeHandle::ALL {
            assert_eq!(resize_rect(original, handle, Vec2::ZERO, PAGE, None), original);
        }
    }
}
