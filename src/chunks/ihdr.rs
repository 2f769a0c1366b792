use nom::{bytes::complete::take, number::complete::be_u32, sequence::tuple, IResult};

use super::{crc::calculate_crc, ParseableChunk};
use crate::error::PngError;
use crate::utils::div_ceil;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}
impl IHDRChunk {
    /// A header for the 8-bit truecolor subset this crate encodes.
    pub fn rgb8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::Truecolor,
            compression_method: 0,
            filter_method: 0,
            interlace_method: 0,
        }
    }

    /// Checks the header against the supported subset: 8-bit non-interlaced
    /// truecolor with the standard compression and filter methods.
    pub fn validate(&self) -> Result<(), PngError> {
        if self.width == 0 || self.height == 0 {
            return Err(PngError::format("image dimensions must be positive"));
        }
        if self.bit_depth != 8 {
            return Err(PngError::unsupported(format!(
                "bit depth {} (only 8 is supported)",
                self.bit_depth
            )));
        }
        if self.color_type != ColorType::Truecolor {
            return Err(PngError::unsupported(format!(
                "color type {:?} (only truecolor RGB is supported)",
                self.color_type
            )));
        }
        if self.compression_method != 0 {
            return Err(PngError::unsupported(format!(
                "compression method {}",
                self.compression_method
            )));
        }
        if self.filter_method != 0 {
            return Err(PngError::unsupported(format!(
                "filter method {}",
                self.filter_method
            )));
        }
        if self.interlace_method != 0 {
            return Err(PngError::unsupported("interlaced images"));
        }
        Ok(())
    }

    pub(crate) fn filter_width(&self) -> u8 {
        let channel_count = self.color_type.channel_count();
        let sample_width = u8::max(self.bit_depth / 8, 1);
        channel_count * sample_width
    }

    pub(crate) fn pixel_width(&self) -> u8 {
        self.color_type.channel_count() * self.bit_depth
    }

    /// Bytes per stored scanline, including the leading filter-type byte.
    pub(crate) fn scanline_size(&self) -> usize {
        div_ceil(self.width as usize * self.pixel_width() as usize, 8) + 1
    }
}
impl<'a> ParseableChunk<'a> for IHDRChunk {
    type Output = Vec<u8>;

    const HEADER: &'static [u8; 4] = b"IHDR";

    fn from_bytes(chunk_data: &'a [u8]) -> Result<Self, PngError> {
        if chunk_data.len() != 13 {
            return Err(PngError::format(format!(
                "IHDR payload is {} bytes, expected 13",
                chunk_data.len()
            )));
        }
        let (_, (width, height, other_bytes)) =
            parse_fields(chunk_data).map_err(|_| PngError::format("truncated IHDR payload"))?;
        Ok(IHDRChunk {
            width,
            height,
            bit_depth: other_bytes[0],
            color_type: other_bytes[1].try_into()?,
            compression_method: other_bytes[2],
            filter_method: other_bytes[3],
            interlace_method: other_bytes[4],
        })
    }

    fn to_bytes(&self) -> Self::Output {
        let mut bytes = vec![0, 0, 0, 13];
        bytes.extend(Self::HEADER);
        bytes.extend(&self.width.to_be_bytes());
        bytes.extend(&self.height.to_be_bytes());
        bytes.extend(&[
            self.bit_depth,
            self.color_type as u8,
            self.compression_method,
            self.filter_method,
            self.interlace_method,
        ]);
        let crc = calculate_crc(bytes[4..].iter().copied()).to_be_bytes();
        bytes.extend(crc);
        bytes
    }
}

fn parse_fields(chunk_data: &[u8]) -> IResult<&[u8], (u32, u32, &[u8])> {
    tuple((be_u32, be_u32, take(5usize)))(chunk_data)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale = 0,
    Truecolor = 2,
    IndexedColor = 3,
    GreyscaleWithAlpha = 4,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = PngError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleWithAlpha),
            6 => Ok(Self::TruecolorWithAlpha),
            i => Err(PngError::format(format!("invalid color type {i}"))),
        }
    }
}
impl ColorType {
    pub(crate) fn channel_count(&self) -> u8 {
        match self {
            Self::Greyscale => 1,
            Self::IndexedColor => 1,
            Self::GreyscaleWithAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }
}
