//! The five reversible PNG scanline filters.
//!
//! Every filter predicts a byte from its already known neighbours and stores
//! the difference. `forward` turns absolute values into deltas, `inverse`
//! turns deltas back into absolute values. All arithmetic wraps modulo 256.
//!
//! Neighbours are taken per byte with a stride of one pixel, so each channel
//! (including alpha) is predicted only from the same channel of the pixel to
//! the left, above and above-left. Missing neighbours count as `0`.

use crate::checksum::clamp_byte;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth,
}

impl TryFrom<u8> for FilterType {
    type Error = u8;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(FilterType::None),
            1 => Ok(FilterType::Sub),
            2 => Ok(FilterType::Up),
            3 => Ok(FilterType::Average),
            4 => Ok(FilterType::Paeth),
            other => Err(other),
        }
    }
}

impl From<FilterType> for u8 {
    fn from(value: FilterType) -> Self {
        match value {
            FilterType::None => 0,
            FilterType::Sub => 1,
            FilterType::Up => 2,
            FilterType::Average => 3,
            FilterType::Paeth => 4,
        }
    }
}

/// The same channel of the left, upper and upper-left pixel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    pub left: u8,
    pub above: u8,
    pub upper_left: u8,
}

impl Neighbors {
    /// neighbours of byte `i` in `row`, looking `bpp` bytes back for the left side
    #[inline]
    fn of(row: &[u8], prev: Option<&[u8]>, i: usize, bpp: usize) -> Self {
        let left = if i >= bpp { row[i - bpp] } else { 0 };
        let (above, upper_left) = match prev {
            Some(prev) => (prev[i], if i >= bpp { prev[i - bpp] } else { 0 }),
            None => (0, 0),
        };

        Self {
            left,
            above,
            upper_left,
        }
    }
}

impl FilterType {
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Average,
        FilterType::Paeth,
    ];

    #[inline]
    pub fn predict(self, n: Neighbors) -> u8 {
        match self {
            FilterType::None => 0,
            FilterType::Sub => n.left,
            FilterType::Up => n.above,
            FilterType::Average => ((u16::from(n.left) + u16::from(n.above)) / 2) as u8,
            FilterType::Paeth => paeth(n.left, n.above, n.upper_left),
        }
    }

    /// absolute value -> stored delta
    #[inline]
    pub fn forward(self, raw: u8, n: Neighbors) -> u8 {
        clamp_byte(i32::from(raw) - i32::from(self.predict(n)))
    }

    /// stored delta -> absolute value
    #[inline]
    pub fn inverse(self, filtered: u8, n: Neighbors) -> u8 {
        clamp_byte(i32::from(filtered) + i32::from(self.predict(n)))
    }
}

/// Picks whichever of left, above and upper-left is closest to
/// `left + above - upper_left`. Ties go to left, then above.
#[inline]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let (ia, ib, ic) = (i16::from(a), i16::from(b), i16::from(c));
    let p = ia + ib - ic;
    let pa = (p - ia).abs();
    let pb = (p - ib).abs();
    let pc = (p - ic).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Filters one row of absolute values and appends the deltas to `out`.
///
/// `prev` is the previous row in its absolute (unfiltered) form.
pub fn filter_row(
    kind: FilterType,
    row: &[u8],
    prev: Option<&[u8]>,
    bpp: usize,
    out: &mut Vec<u8>,
) {
    out.reserve(row.len());
    for (i, raw) in row.iter().enumerate() {
        out.push(kind.forward(*raw, Neighbors::of(row, prev, i, bpp)));
    }
}

/// Reverses the filter of one row in place.
///
/// Bytes are restored left to right, so the left neighbour of every byte is
/// already absolute when it is needed. `prev` must be the fully restored
/// previous row.
pub fn unfilter_row(kind: FilterType, row: &mut [u8], prev: Option<&[u8]>, bpp: usize) {
    if kind == FilterType::None {
        return;
    }
    for i in 0..row.len() {
        let n = Neighbors::of(row, prev, i, bpp);
        row[i] = kind.inverse(row[i], n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [u8; 9] = [0, 1, 2, 63, 127, 128, 200, 254, 255];

    #[test]
    fn filter_tags_should_map_both_ways() {
        for kind in FilterType::ALL {
            let tag: u8 = kind.into();
            assert_eq!(FilterType::try_from(tag), Ok(kind));
        }
        assert_eq!(FilterType::try_from(5), Err(5));
        assert_eq!(FilterType::try_from(255), Err(255));
    }

    #[test]
    fn every_filter_should_be_invertible_for_all_raw_values() {
        for kind in FilterType::ALL {
            for left in SAMPLES {
                for above in SAMPLES {
                    for upper_left in SAMPLES {
                        let n = Neighbors {
                            left,
                            above,
                            upper_left,
                        };
                        for raw in 0..=255u8 {
                            let filtered = kind.forward(raw, n);
                            assert_eq!(
                                kind.inverse(filtered, n),
                                raw,
                                "{kind:?} not invertible for raw={raw} neighbours={n:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn forward_should_wrap_below_zero() {
        let n = Neighbors {
            left: 200,
            above: 10,
            upper_left: 0,
        };
        assert_eq!(FilterType::Sub.forward(100, n), 156);
        assert_eq!(FilterType::Up.forward(5, n), 251);
        assert_eq!(FilterType::None.forward(5, n), 5);
    }

    #[test]
    fn average_should_use_floor_of_unwrapped_sum() {
        let n = Neighbors {
            left: 255,
            above: 254,
            upper_left: 0,
        };
        assert_eq!(FilterType::Average.predict(n), 254);

        let n = Neighbors {
            left: 3,
            above: 0,
            upper_left: 0,
        };
        assert_eq!(FilterType::Average.predict(n), 1);
    }

    #[test]
    fn paeth_should_break_ties_left_then_above() {
        // p = 30, pa = 10, pb = 20, pc = 10 -> left wins over upper-left
        assert_eq!(paeth(40, 10, 20), 40);
        // p = 30, pa = 20, pb = 10, pc = 10 -> above wins over upper-left
        assert_eq!(paeth(10, 40, 20), 40);
        // p = 20, pa = 10, pb = 10, pc = 0 -> upper-left
        assert_eq!(paeth(10, 30, 20), 20);
        // p = 5 + 9 - 9 = 5, pa = 0 -> left
        assert_eq!(paeth(5, 9, 9), 5);
        // p = 9 + 5 - 9 = 5, pa = 4, pb = 0, pc = 4 -> above
        assert_eq!(paeth(9, 5, 9), 5);
    }

    #[test]
    fn rows_should_round_trip_through_all_filters() {
        let bpp = 3;
        let prev: Vec<u8> = (0..12u8).map(|i| i.wrapping_mul(37)).collect();
        let row: Vec<u8> = (0..12u8).map(|i| 250u8.wrapping_sub(i.wrapping_mul(29))).collect();

        for kind in FilterType::ALL {
            for prev in [None, Some(prev.as_slice())] {
                let mut filtered = Vec::new();
                filter_row(kind, &row, prev, bpp, &mut filtered);
                unfilter_row(kind, &mut filtered, prev, bpp);
                assert_eq!(filtered, row, "{kind:?} with previous row {:?}", prev.is_some());
            }
        }
    }

    #[test]
    fn sub_filter_should_only_look_at_the_same_channel() {
        let bpp = 4;
        let row = [10, 20, 30, 40, 15, 25, 35, 45];
        let mut out = Vec::new();
        filter_row(FilterType::Sub, &row, None, bpp, &mut out);

        assert_eq!(out, [10, 20, 30, 40, 5, 5, 5, 5]);
    }
}
