use log::debug;

use crate::error::SteganoError;
use crate::filter::{filter_row, unfilter_row, FilterType};
use crate::options::CompressionLevel;
use crate::png::{ChannelLayout, ImageHeader};
use crate::progress::{Progress, ProgressEvent};
use crate::result::Result;
use crate::zlib;

/// The defiltered pixels of an image, row by row.
///
/// Every pixel holds its channel bytes in absolute form. The filter type each
/// scanline was stored with is kept, so [`PixelGrid::encode`] writes the rows
/// back with the same filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    filters: Vec<FilterType>,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Inflates the concatenated IDAT payload and defilters all scanlines.
    ///
    /// At most one byte more than the header announces is inflated, so a
    /// header claiming huge dimensions cannot make the stream grow unbounded.
    pub fn decode_compressed(
        compressed: &[u8],
        header: &ImageHeader,
        progress: &mut dyn Progress,
    ) -> Result<Self> {
        let limit = (header.pixel_stream_len() as u64).saturating_add(1);
        let stream = zlib::inflate(compressed, limit)?;

        Self::decode(&stream, header, progress)
    }

    /// Defilters a decompressed pixel stream.
    ///
    /// Rows are restored top to bottom, each one needs the restored row above.
    pub fn decode(
        stream: &[u8],
        header: &ImageHeader,
        progress: &mut dyn Progress,
    ) -> Result<Self> {
        let expected = header.pixel_stream_len();
        if stream.len() < expected {
            return Err(SteganoError::PixelDataSizeMismatch {
                expected,
                actual: stream.len(),
            });
        }
        if stream.len() > expected {
            debug!("ignoring data behind the last scanline");
        }

        let height = header.height as usize;
        let stride = header.stride();
        let bpp = header.bytes_per_pixel();
        let mut filters = Vec::with_capacity(height);
        let mut data = vec![0; stride * height];

        for (y, scanline) in stream[..expected]
            .chunks_exact(header.scanline_len())
            .enumerate()
        {
            let kind = FilterType::try_from(scanline[0])
                .map_err(|tag| SteganoError::InvalidFilterType { row: y, tag })?;
            filters.push(kind);

            let (done, rest) = data.split_at_mut(y * stride);
            let prev = y.checked_sub(1).map(|p| &done[p * stride..]);
            let row = &mut rest[..stride];
            row.copy_from_slice(&scanline[1..]);
            unfilter_row(kind, row, prev, bpp);

            progress.on_progress(ProgressEvent::RowsDefiltered {
                done: y as u64 + 1,
                total: height as u64,
            });
        }
        debug!("defiltered {height} scanlines of {stride} bytes");

        Ok(Self {
            width: header.width,
            height: header.height,
            layout: header.layout,
            filters,
            data,
        })
    }

    /// Filters every row with its original filter type and returns the
    /// uncompressed scanline stream.
    ///
    /// Neighbours are taken from the absolute pixel values, never from
    /// already filtered output.
    pub fn encode(&self, progress: &mut dyn Progress) -> Vec<u8> {
        let stride = self.stride();
        let bpp = self.layout.bytes_per_pixel();
        let total = self.height as u64;
        let mut stream = Vec::with_capacity((stride + 1) * self.height as usize);

        for (y, (row, kind)) in self.data.chunks_exact(stride).zip(&self.filters).enumerate() {
            let prev = y.checked_sub(1).map(|p| self.row(p as u32));
            stream.push((*kind).into());
            filter_row(*kind, row, prev, bpp, &mut stream);

            progress.on_progress(ProgressEvent::RowsFiltered {
                done: y as u64 + 1,
                total,
            });
        }

        stream
    }

    /// [`PixelGrid::encode`] followed by zlib compression
    pub fn encode_compressed(
        &self,
        level: CompressionLevel,
        progress: &mut dyn Progress,
    ) -> Result<Vec<u8>> {
        let stream = self.encode(progress);
        let compressed = zlib::deflate(&stream, level)?;
        debug!(
            "compressed {} scanline bytes into {} bytes",
            stream.len(),
            compressed.len()
        );

        Ok(compressed)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// number of message bits the red, green and blue channels can carry
    pub fn capacity_bits(&self) -> u64 {
        crate::stego::capacity_bits(self.width, self.height)
    }

    /// filter type per row, as found in the carrier
    pub fn filters(&self) -> &[FilterType] {
        &self.filters
    }

    fn stride(&self) -> usize {
        self.width as usize * self.layout.bytes_per_pixel()
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// byte offset of the first channel of pixel `(x, y)` in [`PixelGrid::data`]
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.layout.bytes_per_pixel()
    }

    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = self.offset(x, y);
        &self.data[start..start + self.layout.bytes_per_pixel()]
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let start = self.offset(x, y);
        let bpp = self.layout.bytes_per_pixel();
        &mut self.data[start..start + bpp]
    }

    /// all channel bytes, row major
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use crate::test_utils::{header, scanlines};

    #[test]
    fn should_defilter_every_filter_type() {
        let header = header(3, 5, ChannelLayout::Rgba);
        let raw: Vec<u8> = (0..(3 * 5 * 4) as u32).map(|i| (i * 37 % 256) as u8).collect();
        let stream = scanlines(&raw, &header, &FilterType::ALL);

        let grid = PixelGrid::decode(&stream, &header, &mut NoProgress).expect("valid stream");

        assert_eq!(grid.data(), &raw[..]);
        assert_eq!(grid.filters(), &FilterType::ALL[..]);
        assert_eq!(grid.pixel(1, 2), &raw[(2 * 3 + 1) * 4..(2 * 3 + 2) * 4]);
    }

    #[test]
    fn encode_should_reproduce_the_original_stream() {
        let header = header(4, 5, ChannelLayout::Rgb);
        let raw: Vec<u8> = (0..(4 * 5 * 3) as u32).map(|i| (255 - i * 11 % 256) as u8).collect();
        let filters = [
            FilterType::Paeth,
            FilterType::Average,
            FilterType::Up,
            FilterType::Sub,
            FilterType::None,
        ];
        let stream = scanlines(&raw, &header, &filters);

        let grid = PixelGrid::decode(&stream, &header, &mut NoProgress).expect("valid stream");

        assert_eq!(grid.encode(&mut NoProgress), stream);
    }

    #[test]
    fn encode_should_refilter_mutated_pixels_consistently() {
        let header = header(2, 3, ChannelLayout::Rgb);
        let raw = vec![10u8; 2 * 3 * 3];
        let stream = scanlines(&raw, &header, &[FilterType::Paeth; 3]);
        let mut grid = PixelGrid::decode(&stream, &header, &mut NoProgress).expect("valid stream");

        grid.pixel_mut(1, 1)[0] = 11;
        let refiltered = grid.encode(&mut NoProgress);
        let again = PixelGrid::decode(&refiltered, &header, &mut NoProgress).expect("valid stream");

        assert_eq!(again, grid);
        assert_eq!(again.pixel(1, 1), &[11, 10, 10]);
    }

    #[test]
    fn should_reject_an_unknown_filter_tag() {
        let header = header(1, 2, ChannelLayout::Rgb);
        let stream = [0, 1, 2, 3, 7, 4, 5, 6];

        assert!(matches!(
            PixelGrid::decode(&stream, &header, &mut NoProgress),
            Err(SteganoError::InvalidFilterType { row: 1, tag: 7 })
        ));
    }

    #[test]
    fn should_reject_a_short_stream() {
        let header = header(2, 2, ChannelLayout::Rgb);

        assert!(matches!(
            PixelGrid::decode(&[0; 13], &header, &mut NoProgress),
            Err(SteganoError::PixelDataSizeMismatch {
                expected: 14,
                actual: 13
            })
        ));
    }

    #[test]
    fn should_report_every_row() {
        let header = header(1, 4, ChannelLayout::Rgb);
        let stream = scanlines(&[0; 12], &header, &[FilterType::None; 4]);
        let mut events = Vec::new();

        PixelGrid::decode(&stream, &header, &mut |e: ProgressEvent| events.push(e))
            .expect("valid stream");

        assert_eq!(events.len(), 4);
        assert_eq!(
            events.last(),
            Some(&ProgressEvent::RowsDefiltered { done: 4, total: 4 })
        );
    }
}
