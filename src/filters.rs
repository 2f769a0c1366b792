use crate::chunks::ihdr::IHDRChunk;
use crate::error::PngError;

/// The five per-scanline filters. In the PNG naming, `a` is the byte one
/// pixel to the left, `b` the byte directly above, and `c` the byte one
/// pixel to the left in the row above; all three read as 0 off the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}
impl Filter {
    pub(crate) fn filter(self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => x,
            Filter::Sub => x.wrapping_sub(a),
            Filter::Up => x.wrapping_sub(b),
            Filter::Average => x.wrapping_sub(((a as u16 + b as u16) / 2) as u8),
            Filter::Paeth => x.wrapping_sub(paeth_predict(a, b, c)),
        }
    }

    pub(crate) fn reconstruct(self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => x,
            Filter::Sub => x.wrapping_add(a),
            Filter::Up => x.wrapping_add(b),
            Filter::Average => x.wrapping_add(((a as u16 + b as u16) / 2) as u8),
            Filter::Paeth => x.wrapping_add(paeth_predict(a, b, c)),
        }
    }
}
impl TryFrom<u8> for Filter {
    type Error = PngError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            i => Err(PngError::format(format!("unknown scanline filter type {i}"))),
        }
    }
}

// Ties resolve to a, then b, then c.
fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Undoes the per-row filtering in place, leaving the filter-type bytes
/// untouched. Rows are processed top to bottom so that `b` and `c` always
/// read already-reconstructed bytes.
pub(crate) fn reconstruct_scanlines(data: &mut [u8], header: &IHDRChunk) -> Result<(), PngError> {
    let stride = header.scanline_size();
    let bpp = header.filter_width() as usize;
    for y in 0..header.height as usize {
        let row_start = y * stride;
        let filter = Filter::try_from(data[row_start])?;
        for i in 0..stride - 1 {
            let idx = row_start + 1 + i;
            let a = if i >= bpp { data[idx - bpp] } else { 0 };
            let b = if y > 0 { data[idx - stride] } else { 0 };
            let c = if y > 0 && i >= bpp {
                data[idx - stride - bpp]
            } else {
                0
            };
            data[idx] = filter.reconstruct(data[idx], a, b, c);
        }
    }
    Ok(())
}

/// Filters raw pixel rows for compression, prepending the chosen filter-type
/// byte to each row. Per row, every filter is tried and the one with the
/// smallest sum of absolute filtered values wins; ties go to the lowest
/// filter type. Filtering always reads the raw bytes of the current and
/// previous rows, never the filtered output.
pub(crate) fn filter_scanlines(pixels: &[u8], header: &IHDRChunk) -> Vec<u8> {
    let bpp = header.filter_width() as usize;
    let row_bytes = header.width as usize * bpp;
    let mut output = Vec::with_capacity(header.height as usize * (row_bytes + 1));
    for y in 0..header.height as usize {
        let row = &pixels[y * row_bytes..(y + 1) * row_bytes];
        let prev = if y > 0 {
            Some(&pixels[(y - 1) * row_bytes..y * row_bytes])
        } else {
            None
        };
        let mut best_filter = Filter::None;
        let mut best_row = row.to_vec();
        let mut best_score = sum_of_magnitudes(&best_row);
        for filter in [Filter::Sub, Filter::Up, Filter::Average, Filter::Paeth] {
            let candidate = apply_filter(filter, row, prev, bpp);
            let score = sum_of_magnitudes(&candidate);
            if score < best_score {
                best_filter = filter;
                best_row = candidate;
                best_score = score;
            }
        }
        output.push(best_filter as u8);
        output.extend_from_slice(&best_row);
    }
    output
}

fn apply_filter(filter: Filter, row: &[u8], prev: Option<&[u8]>, bpp: usize) -> Vec<u8> {
    let mut filtered = Vec::with_capacity(row.len());
    for (i, &x) in row.iter().enumerate() {
        let a = if i >= bpp { row[i - bpp] } else { 0 };
        let b = prev.map_or(0, |p| p[i]);
        let c = if i >= bpp { prev.map_or(0, |p| p[i - bpp]) } else { 0 };
        filtered.push(filter.filter(x, a, b, c));
    }
    filtered
}

// Filtered bytes read as signed deltas; rows that compress well have small ones.
fn sum_of_magnitudes(filtered: &[u8]) -> u64 {
    filtered
        .iter()
        .map(|&v| (v as i8).unsigned_abs() as u64)
        .sum()
}
