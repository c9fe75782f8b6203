//! Random placement of segments inside a source and of defects inside a segment

use rand::Rng;

/// Pick where the output segment starts inside the source, in seconds.
///
/// The source is split into `floor(total / segment)` slots. The first slot is
/// skipped when there is more than one, and the last one is skipped when there
/// are more than two, so the segment never sits at the very start or end.
/// The result is always a whole multiple of `segment`.
pub fn segment_start<R: Rng + ?Sized>(rng: &mut R, total_duration: f64, segment_duration: f64) -> f64 {
    let mut max_slots = (total_duration / segment_duration).floor() as i64;
    let min_slot = if max_slots > 1 { 1 } else { 0 };
    if max_slots > 2 {
        max_slots -= 1;
    }

    // Sources shorter than one segment are rejected at probe time.
    let slot = if max_slots > min_slot {
        rng.gen_range(min_slot..max_slots)
    } else {
        0
    };

    slot as f64 * segment_duration
}

/// Pick where the defect begins relative to the segment start, in whole seconds.
///
/// The range is `[1, int(segment) - int(asset))`, widened to start at 0 when
/// it would otherwise hold at most one value, so the defect ends before the
/// segment does.
pub fn defect_offset<R: Rng + ?Sized>(rng: &mut R, segment_duration: f64, asset_duration: f64) -> u32 {
    let max = segment_duration as i64 - asset_duration as i64;
    let min = if max > 1 { 1 } else { 0 };

    if max <= min {
        return 0;
    }

    rng.gen_range(min..max).max(0) as u32
}
