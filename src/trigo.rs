//! Fixed-point trigonometry source.
//!
//! The transform builder only needs `sin` at whole-degree resolution; cosine
//! is read as a 90° shifted sine. The source is injected through
//! [`TrigSource`] so a synthetic table can stand in for [`SinTable`].

/// Precision of [`SinTable`] values: `sin(90°) == 32767 ≈ 1 << 15`.
pub const TRIGO_SHIFT: u32 = 15;

/// Sine of 0..=90 degrees as `round(32767 * sin(deg))`.
const SIN_0_90: [i16; 91] = [
    0, 572, 1144, 1715, 2286, 2856, 3425, 3993, 4560, 5126, 5690, 6252, 6813, 7371, 7927, 8481,
    9032, 9580, 10126, 10668, 11207, 11743, 12275, 12803, 13328, 13848, 14364, 14876, 15383,
    15886, 16383, 16876, 17364, 17846, 18323, 18794, 19260, 19720, 20173, 20621, 21062, 21497,
    21925, 22347, 22762, 23170, 23571, 23964, 24351, 24730, 25101, 25465, 25821, 26169, 26509,
    26841, 27165, 27481, 27788, 28087, 28377, 28659, 28932, 29196, 29451, 29697, 29934, 30162,
    30381, 30591, 30791, 30982, 31163, 31335, 31498, 31650, 31794, 31927, 32051, 32165, 32269,
    32364, 32448, 32523, 32587, 32642, 32687, 32722, 32747, 32762, 32767,
];

// ============================================================================
// TrigSource trait
// ============================================================================

/// Fixed-point sine lookup used by the transform descriptor builder.
pub trait TrigSource {
    /// Sine of `angle_deg` (whole degrees, any sign) scaled by `1 << shift()`.
    fn sin(&self, angle_deg: i32) -> i32;

    /// Number of fractional bits in the values returned by [`sin`](Self::sin).
    /// Any value works; coefficients are rescaled to 10 fractional bits.
    fn shift(&self) -> u32 {
        TRIGO_SHIFT
    }
}

/// Plain functions and closures act as a source with [`TRIGO_SHIFT`] precision.
impl<F: Fn(i32) -> i32> TrigSource for F {
    fn sin(&self, angle_deg: i32) -> i32 {
        self(angle_deg)
    }
}

// ============================================================================
// SinTable
// ============================================================================

/// Quarter-wave sine table folded into all four quadrants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinTable;

impl SinTable {
    pub const fn new() -> Self {
        Self
    }

    /// Sine at [`TRIGO_SHIFT`] precision.
    pub fn sin(angle_deg: i32) -> i32 {
        let a = angle_deg.rem_euclid(360) as usize;
        match a {
            0..=89 => SIN_0_90[a] as i32,
            90..=179 => SIN_0_90[180 - a] as i32,
            180..=269 => -(SIN_0_90[a - 180] as i32),
            _ => -(SIN_0_90[360 - a] as i32),
        }
    }

    /// Cosine at [`TRIGO_SHIFT`] precision.
    #[inline]
    pub fn cos(angle_deg: i32) -> i32 {
        Self::sin(angle_deg + 90)
    }
}

impl TrigSource for SinTable {
    #[inline]
    fn sin(&self, angle_deg: i32) -> i32 {
        SinTable::sin(angle_deg)
    }
}
