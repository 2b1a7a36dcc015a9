pub(crate) fn mul_div255_u32(x: u32, y: u32) -> u32 {
    ((x * y) + 127) / 255
}

pub(crate) fn mul_div255_u8(x: u8, y: u8) -> u8 {
    mul_div255_u32(u32::from(x), u32::from(y)) as u8
}

/// Round-to-nearest and clamp into the byte channel range.
pub(crate) fn round_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Fractional coverage in `0.0..=1.0` to an 8-bit scale.
pub(crate) fn coverage_to_u8(c: f32) -> u8 {
    round_to_u8(c.clamp(0.0, 1.0) * 255.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
