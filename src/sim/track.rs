//! Track recycling
//!
//! A handful of segments give the illusion of an endless track: whenever a
//! segment has scrolled far enough behind the camera it is moved in front of
//! the current front-most segment.

use crate::consts::RECYCLE_LOOK_BEHIND;

use super::registry::TrackSegment;

/// Segments with X below this are out of view and get recycled
#[inline]
pub fn recycle_threshold(camera_x: f32, width: f32) -> f32 {
    camera_x - width * RECYCLE_LOOK_BEHIND
}

/// Move every stale segment to the front of the track.
///
/// The front is re-measured after each move, so several segments going stale
/// in the same frame are stacked one after another instead of on top of each
/// other. Returns the IDs of the moved segments.
pub fn recycle(camera_x: f32, segments: &mut [TrackSegment], width: f32) -> Vec<u32> {
    let threshold = recycle_threshold(camera_x, width);
    let mut moved = Vec::new();

    for i in 0..segments.len() {
        if segments[i].pos.x >= threshold {
            continue;
        }
        let front = segments
            .iter()
            .map(|s| s.pos.x)
            .fold(f32::NEG_INFINITY, f32::max);
        let mut x = front + width;
        // Camera jumped several widths ahead: skip them in one step. Rounding at
        // large magnitudes can land short, so clamp onto the threshold.
        if x < threshold && width > 0.0 {
            let widths = ((threshold - front) / width).ceil();
            x = (front + widths * width).max(threshold);
        }
        segments[i].pos.x = x;
        log::debug!("recycled segment {} to x={:.2}", segments[i].id, segments[i].pos.x);
        moved.push(segments[i].id);
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn layout(count: usize, width: f32) -> Vec<TrackSegment> {
        (0..count)
            .map(|i| TrackSegment {
                id: i as u32,
                pos: Vec3::new(i as f32 * width, 0.0, 0.0),
            })
            .collect()
    }

    #[test]
    fn test_nothing_stale_nothing_moves() {
        let mut segments = layout(4, 10.0);
        let before = segments.clone();
        assert!(recycle(0.0, &mut segments, 10.0).is_empty());
        assert_eq!(segments, before);
    }

    #[test]
    fn test_stale_segment_goes_to_front() {
        let mut segments = layout(4, 10.0);
        // threshold = 16 - 15 = 1, only the segment at 0 is stale
        let moved = recycle(16.0, &mut segments, 10.0);
        assert_eq!(moved, vec![0]);
        assert_eq!(segments[0].pos.x, 40.0);
        assert_eq!(segments[1].pos.x, 10.0);
    }

    #[test]
    fn test_two_stale_segments_stack() {
        let mut segments = layout(4, 10.0);
        // threshold = 26 - 15 = 11: segments at 0 and 10 are stale
        let moved = recycle(26.0, &mut segments, 10.0);
        assert_eq!(moved, vec![0, 1]);
        assert_eq!(segments[0].pos.x, 40.0);
        assert_eq!(segments[1].pos.x, 50.0);
    }

    #[test]
    fn test_far_jump_still_clears_threshold() {
        let mut segments = layout(3, 10.0);
        recycle(500.0, &mut segments, 10.0);
        let threshold = recycle_threshold(500.0, 10.0);
        assert!(segments.iter().all(|s| s.pos.x >= threshold));
    }

    #[test]
    fn test_degenerate_width_does_not_hang() {
        let mut segments = layout(3, 10.0);
        recycle(100.0, &mut segments, 0.0);
        recycle(100.0, &mut segments, -5.0);
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn test_huge_camera_x_returns() {
        // front + width rounds back to front at this magnitude
        let mut segments = layout(6, 10.0);
        let moved = recycle(1.0e9, &mut segments, 10.0);
        assert_eq!(moved.len(), 6);
        let threshold = recycle_threshold(1.0e9, 10.0);
        assert!(segments.iter().all(|s| s.pos.x >= threshold));

        recycle(f32::INFINITY, &mut segments, 10.0);
        assert_eq!(segments.len(), 6);
    }

    proptest! {
        #[test]
        fn prop_large_camera_x_clears_threshold(
            count in 1usize..12,
            width in 0.5f32..40.0,
            camera_x in 1.0e6f32..1.0e12,
        ) {
            let mut segments = layout(count, width);
            recycle(camera_x, &mut segments, width);
            prop_assert_eq!(segments.len(), count);
            let threshold = recycle_threshold(camera_x, width);
            prop_assert!(segments.iter().all(|s| s.pos.x >= threshold));
        }

        #[test]
        fn prop_count_constant_and_nothing_left_behind(
            count in 1usize..12,
            width in 0.5f32..40.0,
            steps in proptest::collection::vec(0.0f32..30.0, 1..50),
        ) {
            let mut segments = layout(count, width);
            let mut camera_x = 0.0;
            for step in steps {
                camera_x += step;
                recycle(camera_x, &mut segments, width);
                prop_assert_eq!(segments.len(), count);
                let threshold = recycle_threshold(camera_x, width);
                prop_assert!(segments.iter().all(|s| s.pos.x >= threshold));
            }
            let mut ids: Vec<u32> = segments.iter().map(|s| s.id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..count as u32).collect::<Vec<_>>());
        }
    }
}
