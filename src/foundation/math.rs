/// Fraction of the way `value` lies between `from` and `to`.
///
/// A zero-length range reports full progress so a zero-duration timeline still places every
/// sample at its end.
pub fn progress(from: f64, to: f64, value: f64) -> f64 {
    let span = to - from;
    if span == 0.0 { 1.0 } else { (value - from) / span }
}

/// Linear mix of two scalars.
pub fn mix(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Index into a cyclic list of length `len` (`len > 0`).
pub(crate) fn wrap_index(len: usize, i: usize) -> usize {
    i % len
}

/// Append `remaining` offsets spread evenly between the last offset and 1.
pub(crate) fn fill_offset(offset: &mut Vec<f64>, remaining: usize) {
    let min = offset.last().copied().unwrap_or(0.0);
    for i in 1..=remaining {
        let t = progress(0.0, remaining as f64, i as f64);
        offset.push(mix(min, 1.0, t));
    }
}

/// Evenly spaced offsets for `len` keyframes, starting at 0.
pub(crate) fn default_offset(len: usize) -> Vec<f64> {
    let mut offset = vec![0.0];
    fill_offset(&mut offset, len.saturating_sub(1));
    offset
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
