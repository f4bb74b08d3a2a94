//! Remote images shown in the preview: decoding and the per-url texture cache.

use std::collections::HashMap;

use eframe::egui;

const MAX_PREVIEW_EDGE: u32 = 1024;

#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic
        .thumbnail(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE)
        .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

enum RemoteImage {
    Loading,
    Ready(egui::TextureHandle),
    Broken,
}

// Half-typed urls never leave the editor.
fn is_fetchable(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")) && url.len() > "https://".len()
}

/// What the painter should do for a url this frame.
pub enum ImageSlot<'a> {
    Pending,
    Ready(&'a egui::TextureHandle),
    /// Failed to load; the element is hidden.
    Broken,
}

/// Textures keyed by url. Unknown urls are queued for fetching the first
/// time they are asked for and never fetched twice.
#[derive(Default)]
pub struct RemoteImages {
    entries: HashMap<String, RemoteImage>,
    wanted: Vec<String>,
}

impl RemoteImages {
    pub fn slot(&mut self, url: &str) -> ImageSlot<'_> {
        if !self.entries.contains_key(url) {
            if is_fetchable(url) {
                self.entries.insert(url.to_string(), RemoteImage::Loading);
                self.wanted.push(url.to_string());
            } else {
                self.entries.insert(url.to_string(), RemoteImage::Broken);
            }
        }
        match self.entries.get(url) {
            Some(RemoteImage::Ready(texture)) => ImageSlot::Ready(texture),
            Some(RemoteImage::Broken) => ImageSlot::Broken,
            Some(RemoteImage::Loading) | None => ImageSlot::Pending,
        }
    }

    /// Urls asked for since the last call.
    pub fn take_wanted(&mut self) -> Vec<String> {
        std::mem::take(&mut self.wanted)
    }

    pub fn insert(&mut self, ctx: &egui::Context, url: String, image: PreviewImage) {
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
        let texture = ctx.load_texture(
            format!("preview-image:{url}"),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.entries.insert(url, RemoteImage::Ready(texture));
    }

    pub fn mark_broken(&mut self, url: String) {
        self.entries.insert(url, RemoteImage::Broken);
    }

    /// Forgets a url that could not even be queued so the next frame asks again.
    pub fn forget(&mut self, url: &str) {
        self.entries.remove(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .expect("encode");
        bytes.into_inner()
    }

    #[test]
    fn decodes_png_into_rgba() {
        let image = decode_preview_image(&tiny_png()).expect("decode");
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.rgba.len(), 3 * 2 * 4);
        assert_eq!(&image.rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(decode_preview_image(b"<html>not an image</html>").is_err());
    }

    #[test]
    fn unknown_urls_are_requested_once() {
        let mut images = RemoteImages::default();
        assert!(matches!(images.slot("https://a/x.png"), ImageSlot::Pending));
        assert!(matches!(images.slot("https://a/x.png"), ImageSlot::Pending));
        assert_eq!(images.take_wanted(), vec!["https://a/x.png".to_string()]);
        assert!(images.take_wanted().is_empty());
    }

    #[test]
    fn non_http_urls_are_broken_without_a_fetch() {
        let mut images = RemoteImages::default();
        assert!(matches!(images.slot("htt"), ImageSlot::Broken));
        assert!(matches!(images.slot("data:image/png;base64,AAAA"), ImageSlot::Broken));
        assert!(images.take_wanted().is_empty());
    }

    #[test]
    fn broken_urls_stay_hidden_until_forgotten() {
        let mut images = RemoteImages::default();
        images.slot("https://a/missing.png");
        images.mark_broken("https://a/missing.png".into());
        assert!(matches!(images.slot("https://a/missing.png"), ImageSlot::Broken));

        images.forget("https://a/missing.png");
        images.take_wanted();
        assert!(matches!(images.slot("https://a/missing.png"), ImageSlot::Pending));
        assert_eq!(images.take_wanted().len(), 1);
    }
}
