use std::io::Write;

use crate::chunks::{self, idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, Chunk, ParseableChunk};
use crate::error::PngError;
use crate::image::ImageBuffer;
use crate::image_data;

/// Compressed data is split across IDAT chunks at this size on encode. Any
/// split is legal; decoders must concatenate.
const MAX_IDAT_LEN: usize = 32 * 1024;

pub fn decode(bytes: &[u8]) -> Result<ImageBuffer, PngError> {
    let (rest, _) = chunks::parse_signature(bytes)
        .map_err(|_| PngError::format("input doesn't start with the PNG signature"))?;
    let mut chunk_iter = chunks::iter_chunks(rest);
    let header = match chunk_iter.next() {
        Some(Ok(Chunk::IHDR(header))) => header,
        Some(Ok(_)) => return Err(PngError::format("first chunk is not IHDR")),
        Some(Err(e)) => return Err(e),
        None => return Err(PngError::format("no chunks after the signature")),
    };
    header.validate()?;
    log::debug!(
        "decoding a {}x{} truecolor image",
        header.width,
        header.height
    );

    let mut compressed = Vec::new();
    let mut seen_iend = false;
    for chunk in &mut chunk_iter {
        match chunk? {
            Chunk::IDAT(idat) => compressed.extend_from_slice(idat.data),
            Chunk::IEND => {
                seen_iend = true;
                break;
            }
            Chunk::IHDR(_) => return Err(PngError::format("duplicate IHDR chunk")),
            Chunk::Unknown(raw) => log::debug!("skipping {} chunk", raw.type_name()),
        }
    }
    if !seen_iend {
        return Err(PngError::format("missing IEND chunk"));
    }
    if compressed.is_empty() {
        return Err(PngError::format("missing IDAT chunk"));
    }

    let pixels = image_data::decompress_data(&compressed, &header)?;
    ImageBuffer::from_raw(header.width, header.height, pixels)
}

pub fn encode(image: &ImageBuffer) -> Vec<u8> {
    let header = IHDRChunk::rgb8(image.width(), image.height());
    let compressed = image_data::compress_data(image.as_bytes(), &header);
    let mut output = Vec::with_capacity(compressed.len() + 64);
    output.extend_from_slice(chunks::SIGNATURE);
    output.extend(header.to_bytes());
    for piece in compressed.chunks(MAX_IDAT_LEN) {
        output.extend(IDATChunk { data: piece }.to_bytes());
    }
    output.extend(IENDChunk.to_bytes());
    output
}

pub fn encode_into<W: Write>(image: &ImageBuffer, mut writer: W) -> Result<(), PngError> {
    writer.write_all(&encode(image))?;
    Ok(())
}
