use miniz_oxide::{
    deflate::compress_to_vec_zlib,
    inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus},
};

use crate::chunks::ihdr::IHDRChunk;
use crate::error::PngError;
use crate::filters::{filter_scanlines, reconstruct_scanlines};

const COMPRESSION_LEVEL: u8 = 9;

pub(crate) fn compress_data(pixels: &[u8], header: &IHDRChunk) -> Vec<u8> {
    let filtered = filter_scanlines(pixels, header);
    compress_to_vec_zlib(&filtered, COMPRESSION_LEVEL)
}

pub(crate) fn decompress_data(compressed: &[u8], header: &IHDRChunk) -> Result<Vec<u8>, PngError> {
    let stride = header.scanline_size();
    let expected = header.height as usize * stride;
    // a stream blowing past the limit is a wrong size, not a corrupt codec state
    let mut data = decompress_to_vec_zlib_with_limit(compressed, expected).map_err(|e| {
        if e.status == TINFLStatus::HasMoreOutput {
            PngError::format(format!(
                "decompressed image data exceeds the expected {expected} bytes"
            ))
        } else {
            PngError::Compression(e.to_string())
        }
    })?;
    if data.len() != expected {
        return Err(PngError::format(format!(
            "decompressed image data is {} bytes, expected {}",
            data.len(),
            expected
        )));
    }
    reconstruct_scanlines(&mut data, header)?;
    let mut pixels = Vec::with_capacity(expected - header.height as usize);
    for row in data.chunks_exact(stride) {
        pixels.extend_from_slice(&row[1..]);
    }
    Ok(pixels)
}
