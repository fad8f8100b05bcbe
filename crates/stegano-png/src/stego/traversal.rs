use crate::png::ChannelLayout;

/// number of channels per pixel that carry message bits, alpha never does
pub const PAYLOAD_CHANNELS: usize = 3;

/// Visits pixel coordinates column by column: all rows of column 0 top to
/// bottom, then column 1 and so on.
#[derive(Debug, Clone)]
pub struct ColumnMajor {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
}

impl ColumnMajor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: 0,
            y: 0,
        }
    }

    fn remaining(&self) -> usize {
        if self.height == 0 || self.x >= self.width {
            return 0;
        }
        let columns_left = (self.width - self.x) as usize;
        columns_left * self.height as usize - self.y as usize
    }
}

impl Iterator for ColumnMajor {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.height == 0 || self.x >= self.width {
            return None;
        }
        let current = (self.x, self.y);
        self.y += 1;
        if self.y == self.height {
            self.y = 0;
            self.x += 1;
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ColumnMajor {}

/// Byte offsets into the row major channel data of the red, green and blue
/// channel of every pixel, in the order message bits are stored.
pub fn payload_offsets(
    width: u32,
    height: u32,
    layout: ChannelLayout,
) -> impl Iterator<Item = usize> {
    let bpp = layout.bytes_per_pixel();
    ColumnMajor::new(width, height).flat_map(move |(x, y)| {
        let start = (y as usize * width as usize + x as usize) * bpp;
        start..start + PAYLOAD_CHANNELS
    })
}
