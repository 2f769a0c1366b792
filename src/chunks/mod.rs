use nom::{
    bytes::complete::{tag, take},
    combinator::map,
    multi::length_data,
    number::complete::be_u32,
    IResult,
};

use crate::error::PngError;

mod crc;
pub mod idat;
pub mod iend;
pub mod ihdr;

pub const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

pub fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}

pub fn iter_chunks(source: &[u8]) -> ChunkIter {
    ChunkIter {
        source,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<Chunk<'a>, PngError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.source.is_empty() {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn parse_chunk(input: &[u8]) -> Result<(&[u8], Chunk<'_>), PngError> {
    let (rest, (chunk_type, chunk_data, stored)) = chunk_frame(input)
        .map_err(|_| PngError::format("truncated or malformed chunk"))?;
    let computed = crc::calculate_crc(chunk_type.iter().chain(chunk_data).copied());
    if computed != stored {
        return Err(PngError::Checksum {
            chunk_type: String::from_utf8_lossy(chunk_type).into_owned(),
            stored,
            computed,
        });
    }
    let chunk = match chunk_type {
        ihdr::IHDRChunk::HEADER => Chunk::IHDR(ihdr::IHDRChunk::from_bytes(chunk_data)?),
        idat::IDATChunk::HEADER => Chunk::IDAT(idat::IDATChunk::from_bytes(chunk_data)?),
        iend::IENDChunk::HEADER => Chunk::IEND,
        _ => Chunk::Unknown(RawChunk {
            chunk_type,
            _chunk_data: chunk_data,
        }),
    };
    Ok((rest, chunk))
}

#[derive(Debug)]
pub struct RawChunk<'a> {
    chunk_type: &'a [u8; 4],
    _chunk_data: &'a [u8],
}

impl RawChunk<'_> {
    pub fn type_name(&self) -> String {
        String::from_utf8_lossy(self.chunk_type).into_owned()
    }
}

fn chunk_frame(input: &[u8]) -> IResult<&[u8], (&[u8; 4], &[u8], u32)> {
    let header_length = 4u32;
    let (input, tagged) = length_data(map(be_u32, |v: u32| v.saturating_add(header_length)))(input)?;
    let (input, stored_crc) = be_u32(input)?;
    let (chunk_data, chunk_type) = map(take(header_length), |v: &[u8]| {
        v.try_into().expect("4 bytes should have been taken")
    })(tagged)?;
    Ok((input, (chunk_type, chunk_data, stored_crc)))
}

pub trait ParseableChunk<'a>: Sized {
    type Output: AsRef<[u8]>;
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> Result<Self, PngError>;
    fn to_bytes(&self) -> Self::Output;
}
