use std::collections::HashMap;
use egui::{ColorImage, Context, TextureHandle, TextureOptions};

pub enum TextureSlot {
    Loading,
    Ready(TextureHandle),
    Failed,
}

/// GPU textures of fetched result images, keyed by display URL.
#[derive(Default)]
pub struct TextureCache {
    slots: HashMap<String, TextureSlot>,
}

impl TextureCache {
    /// Marks `url` as loading. Returns `false` if it is already known.
    pub fn begin(&mut self, url: &str) -> bool {
        if self.slots.contains_key(url) {
            return false;
        }
        self.slots.insert(url.to_string(), TextureSlot::Loading);
        true
    }

    pub fn insert(&mut self, ctx: &Context, url: String, image: ColorImage) {
        let handle = ctx.load_texture(url.clone(), image, TextureOptions::LINEAR);
        self.slots.insert(url, TextureSlot::Ready(handle));
    }

    pub fn fail(&mut self, url: String) {
        self.slots.insert(url, TextureSlot::Failed);
    }

    pub fn get(&self, url: &str) -> Option<&TextureSlot> {
        self.slots.get(url)
    }

    /// Frees every texture not in `keep`.
    pub fn retain_only(&mut self, keep: &[&str]) {
        self.slots.retain(|url, _| keep.contains(&url.as_str()));
    }
}

pub fn decode(bytes: &[u8]) -> Result<ColorImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
