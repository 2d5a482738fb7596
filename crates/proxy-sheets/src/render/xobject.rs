//! XObject creation for card images
//!
//! JPEG files are embedded as-is with `DCTDecode`. Anything else is decoded
//! and stored as Flate-compressed RGB samples.

use crate::types::{ProxyError, Result};
use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, ImageDecoder, ImageFormat, ImageReader};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Cursor;
use std::path::Path;

/// Read an image file and add it to the document as an image XObject
pub(crate) fn create_image_xobject(doc: &mut Document, path: &Path) -> Result<ObjectId> {
    let bytes = std::fs::read(path)?;
    let image_error = |source| ProxyError::Image {
        path: path.to_owned(),
        source,
    };

    let format = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()?
        .format();

    if format == Some(ImageFormat::Jpeg) {
        let decoder = JpegDecoder::new(Cursor::new(&bytes)).map_err(image_error)?;
        let (width, height) = decoder.dimensions();
        let color_space = match decoder.color_type() {
            ColorType::L8 => Some("DeviceGray"),
            ColorType::Rgb8 => Some("DeviceRGB"),
            _ => None,
        };

        if let Some(color_space) = color_space {
            let dict = image_dictionary(width, height, color_space, Some("DCTDecode"));
            let stream = Stream::new(dict, bytes).with_compression(false);
            return Ok(doc.add_object(stream));
        }
    }

    let rgb = image::load_from_memory(&bytes)
        .map_err(image_error)?
        .to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut stream = Stream::new(
        image_dictionary(width, height, "DeviceRGB", None),
        rgb.into_raw(),
    );
    stream.compress()?;

    Ok(doc.add_object(stream))
}

fn image_dictionary(
    width: u32,
    height: u32,
    color_space: &str,
    filter: Option<&str>,
) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    if let Some(filter) = filter {
        dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
    }
    dict
}
