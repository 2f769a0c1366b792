pub mod chunks;
mod error;
mod filters;
mod image;
mod image_data;
mod pixel;
mod png;
mod utils;

pub use error::PngError;
pub use image::ImageBuffer;
pub use pixel::Pixel;
pub use png::{decode, encode, encode_into};
