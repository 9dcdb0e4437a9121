//! PDF assembly: one captured bitmap per page.
//!
//! Each bitmap fills one page exactly at the chosen size preset. The preset
//! is an explicit input; the assembler only verifies that the bitmaps fit
//! it, it never guesses a size from them.

mod error;

pub use error::AssemblyError;

use carta_raster::Bitmap;
use carta_types::PageSizePreset;
use chrono::Utc;
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Tolerance between a bitmap's aspect ratio and the page preset's.
/// Captures come off a fixed-size surface, so anything beyond this means
/// the caller mixed up presets.
const ASPECT_EPSILON: f32 = 0.01;

const JPEG_QUALITY: u8 = 90;

/// Assembles ordered bitmaps into a paginated document.
///
/// Fails on an empty input (a job with zero usable pages has nothing to
/// assemble) and on any bitmap whose aspect ratio does not match `preset`.
pub fn assemble(bitmaps: &[Bitmap], preset: PageSizePreset) -> Result<Document, AssemblyError> {
    if bitmaps.is_empty() {
        return Err(AssemblyError::Empty);
    }
    let page_size = preset.dimensions_pt();
    let page_aspect = page_size.aspect_ratio();

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut page_ids: Vec<Object> = Vec::with_capacity(bitmaps.len());

    for (index, bitmap) in bitmaps.iter().enumerate() {
        if (bitmap.aspect_ratio() - page_aspect).abs() > ASPECT_EPSILON {
            return Err(AssemblyError::AspectRatio {
                page_index: index,
                bitmap_aspect: bitmap.aspect_ratio(),
                page_aspect,
            });
        }

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => bitmap.width() as i64,
                "Height" => bitmap.height() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            encode_jpeg(bitmap)?,
        ));

        // Scale the unit image square to cover the full page.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        page_size.width.into(),
                        0.into(),
                        0.into(),
                        page_size.height.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content
                .encode()
                .map_err(|e| AssemblyError::Pdf(e.to_string()))?,
        ));
        let resources_id = doc.add_object(dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        });
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                page_size.width.into(),
                page_size.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("carta"),
        "CreationDate" => Object::string_literal(creation_date()),
    });
    doc.trailer.set("Info", info_id);

    debug!("assembled {} page(s) at {:?}", page_count, preset);
    Ok(doc)
}

fn encode_jpeg(bitmap: &Bitmap) -> Result<Vec<u8>, AssemblyError> {
    let rgb = bitmap.rgb_bytes();
    let mut out = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder
        .encode(
            &rgb,
            bitmap.width(),
            bitmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| AssemblyError::Encode(e.to_string()))?;
    Ok(out)
}

fn creation_date() -> String {
    format!("D:{}Z", Utc::now().format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A solid-color bitmap proportioned like A-series paper, close enough
    /// to pass the aspect check.
    fn page_bitmap(shade: u8) -> Bitmap {
        Bitmap::from_rgba(100, 141, vec![shade; 100 * 141 * 4]).unwrap()
    }

    #[test]
    fn test_assemble_one_page_per_bitmap() {
        let bitmaps = vec![page_bitmap(10), page_bitmap(20), page_bitmap(30)];
        let doc = assemble(&bitmaps, PageSizePreset::FullMenu).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_page_draws_its_image() {
        let doc = assemble(&[page_bitmap(50)], PageSizePreset::FullMenu).unwrap();
        let pages = doc.get_pages();
        let content = doc.get_page_content(*pages.get(&1).unwrap()).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("Do"), "content stream missing image draw: {}", text);
        assert!(text.contains("cm"), "content stream missing page transform");
    }

    #[test]
    fn test_media_box_matches_preset() {
        for preset in [PageSizePreset::FullMenu, PageSizePreset::CompactHandout] {
            let doc = assemble(&[page_bitmap(0)], preset).unwrap();
            let pages = doc.get_pages();
            let page = doc.get_object(*pages.get(&1).unwrap()).unwrap();
            let media_box = page
                .as_dict()
                .unwrap()
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap();
            let width = media_box[2].as_float().unwrap();
            assert!((width - preset.dimensions_pt().width).abs() < 0.01);
        }
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            assemble(&[], PageSizePreset::FullMenu),
            Err(AssemblyError::Empty)
        ));
    }

    #[test]
    fn test_aspect_mismatch_fails() {
        let square = Bitmap::from_rgba(100, 100, vec![0; 100 * 100 * 4]).unwrap();
        let result = assemble(&[page_bitmap(0), square], PageSizePreset::FullMenu);
        assert!(matches!(
            result,
            Err(AssemblyError::AspectRatio { page_index: 1, .. })
        ));
    }

    #[test]
    fn test_document_carries_info_dictionary() {
        let doc = assemble(&[page_bitmap(0)], PageSizePreset::FullMenu).unwrap();
        let info_ref = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_object(info_ref).unwrap().as_dict().unwrap();
        assert!(info.get(b"Producer").is_ok());
        assert!(info.get(b"CreationDate").is_ok());
    }
}
