use rgb_png::chunks::idat::IDATChunk;
use rgb_png::chunks::iend::IENDChunk;
use rgb_png::chunks::ihdr::{ColorType, IHDRChunk};
use rgb_png::chunks::{self, Chunk, ParseableChunk};
use rgb_png::{decode, encode, encode_into, ImageBuffer, Pixel, PngError};

fn gradient(width: u32, height: u32) -> ImageBuffer {
    let mut image = ImageBuffer::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let pixel = Pixel::new(
                (x * 7 % 256) as u8,
                (y * 13 % 256) as u8,
                ((x + y) * 31 % 256) as u8,
            );
            image.set(x, y, pixel).unwrap();
        }
    }
    image
}

fn parts_of(encoded: &[u8]) -> (IHDRChunk, Vec<u8>) {
    let (rest, _) = chunks::parse_signature(encoded).unwrap();
    let mut header = None;
    let mut compressed = Vec::new();
    for chunk in chunks::iter_chunks(rest) {
        match chunk.unwrap() {
            Chunk::IHDR(ihdr) => header = Some(ihdr),
            Chunk::IDAT(idat) => compressed.extend_from_slice(idat.data),
            _ => (),
        }
    }
    (header.unwrap(), compressed)
}

#[test]
fn roundtrip_is_pixel_exact() {
    for (width, height) in [(1, 1), (4, 4), (33, 17), (64, 1), (1, 64)] {
        let image = gradient(width, height);
        let decoded = decode(&encode(&image)).unwrap();
        assert_eq!(decoded, image, "round trip failed for {width}x{height}");
    }
}

#[test]
fn zero_dimension_images_cannot_be_built_or_encoded() {
    assert!(matches!(
        ImageBuffer::new(0, 5),
        Err(PngError::Format { .. })
    ));
}

#[test]
fn encode_into_writes_the_same_bytes() {
    let image = gradient(5, 5);
    let mut out = Vec::new();
    encode_into(&image, &mut out).unwrap();
    assert_eq!(out, encode(&image));
}

#[test]
fn rejects_bad_signature() {
    assert!(matches!(
        decode(b"not a png at all"),
        Err(PngError::Format { .. })
    ));
    let mut bytes = encode(&gradient(4, 4));
    bytes[0] ^= 0x80;
    assert!(matches!(decode(&bytes), Err(PngError::Format { .. })));
}

#[test]
fn bit_flip_in_idat_payload_fails_checksum() {
    let mut bytes = encode(&gradient(8, 8));
    // signature (8) + IHDR chunk (25) puts the first IDAT payload byte at 41
    bytes[41] ^= 0x01;
    assert!(matches!(
        decode(&bytes),
        Err(PngError::Checksum { chunk_type, .. }) if chunk_type == "IDAT"
    ));
}

#[test]
fn multi_chunk_idat_decodes_identically() {
    let image = gradient(21, 9);
    let (header, compressed) = parts_of(&encode(&image));
    let first = compressed.len() / 3;
    let second = compressed.len() / 2;
    let mut bytes = chunks::SIGNATURE.to_vec();
    bytes.extend(header.to_bytes());
    for piece in [
        &compressed[..first],
        &compressed[first..second],
        &compressed[second..],
    ] {
        bytes.extend(IDATChunk { data: piece }.to_bytes());
    }
    bytes.extend(IENDChunk.to_bytes());
    assert_eq!(decode(&bytes).unwrap(), image);
}

fn lone_header_file(header: IHDRChunk) -> Vec<u8> {
    let mut bytes = chunks::SIGNATURE.to_vec();
    bytes.extend(header.to_bytes());
    bytes.extend(IENDChunk.to_bytes());
    bytes
}

#[test]
fn sixteen_bit_depth_is_unsupported_not_malformed() {
    let mut header = IHDRChunk::rgb8(2, 2);
    header.bit_depth = 16;
    let err = decode(&lone_header_file(header)).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"unsupported png: bit depth 16 (only 8 is supported)");
}

#[test]
fn grayscale_is_unsupported_not_malformed() {
    let mut header = IHDRChunk::rgb8(2, 2);
    header.color_type = ColorType::Greyscale;
    assert!(matches!(
        decode(&lone_header_file(header)),
        Err(PngError::Unsupported { .. })
    ));
}

// A tEXt chunk ("Software\0rgb-png") with its correct CRC.
const TEXT_CHUNK: [u8; 28] = [
    0x00, 0x00, 0x00, 0x10, b't', b'E', b'X', b't', b'S', b'o', b'f', b't', b'w', b'a', b'r', b'e',
    0x00, b'r', b'g', b'b', b'-', b'p', b'n', b'g', 0x16, 0xfb, 0xce, 0xb2,
];

#[test]
fn ancillary_chunks_are_skipped() {
    let image = gradient(6, 6);
    let encoded = encode(&image);
    let mut bytes = encoded[..33].to_vec();
    bytes.extend(TEXT_CHUNK);
    bytes.extend(&encoded[33..]);
    assert_eq!(decode(&bytes).unwrap(), image);
}

#[test]
fn corrupt_ancillary_chunk_still_fails_the_decode() {
    let image = gradient(6, 6);
    let encoded = encode(&image);
    let mut corrupted = TEXT_CHUNK;
    corrupted[10] ^= 0x20;
    let mut bytes = encoded[..33].to_vec();
    bytes.extend(corrupted);
    bytes.extend(&encoded[33..]);
    assert!(matches!(
        decode(&bytes),
        Err(PngError::Checksum { chunk_type, .. }) if chunk_type == "tEXt"
    ));
}

#[test]
fn truncated_file_is_malformed() {
    let bytes = encode(&gradient(8, 8));
    // cut inside the IDAT chunk header
    assert!(matches!(
        decode(&bytes[..40]),
        Err(PngError::Format { .. })
    ));
}

#[test]
fn missing_iend_is_malformed() {
    let bytes = encode(&gradient(8, 8));
    assert!(matches!(
        decode(&bytes[..bytes.len() - 12]),
        Err(PngError::Format { .. })
    ));
}

#[test]
fn first_chunk_must_be_ihdr() {
    let mut bytes = chunks::SIGNATURE.to_vec();
    bytes.extend(IENDChunk.to_bytes());
    assert!(matches!(decode(&bytes), Err(PngError::Format { .. })));
}

#[test]
fn missing_idat_is_malformed() {
    let bytes = lone_header_file(IHDRChunk::rgb8(2, 2));
    assert!(matches!(decode(&bytes), Err(PngError::Format { .. })));
}

#[test]
fn out_of_range_pixel_access() {
    let image = gradient(4, 3);
    assert!(matches!(
        image.get(4, 0),
        Err(PngError::OutOfRange { .. })
    ));
    assert!(matches!(
        image.get(0, 3),
        Err(PngError::OutOfRange { .. })
    ));
    let err = image.get(4, 0).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"pixel (4, 0) is out of range for a 4x3 image");
}
