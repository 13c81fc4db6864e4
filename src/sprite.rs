use crate::asset_manager::{AssetManager, Image};
use crate::surface::Rect;

/// Which image a set of frames is cut from, and how wide that image is.
///
/// The width is captured when the entity is built. A sheet whose image
/// failed to load has width 0 and never yields a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl SpriteSheet {
    pub fn from_image(image: &Image) -> Self {
        SpriteSheet {
            id: image.id.clone(),
            width: image.width,
            height: image.height,
        }
    }

    /// Look the sheet up in the asset cache, falling back to an empty sheet.
    pub fn from_assets(assets: &AssetManager, id: &str) -> Self {
        match assets.get_asset(id) {
            Some(image) => Self::from_image(image),
            None => SpriteSheet {
                id: id.to_string(),
                width: 0,
                height: 0,
            },
        }
    }
}

/// A frame's source rectangle inside the sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            self.width as f64,
            self.height as f64,
        )
    }
}

/// Resolve a linear frame index to its cell on a multi-row sheet.
///
/// The first row starts at `start_x`; once a frame would overrun the sheet
/// width the index wraps onto the next row, which starts at x = 0. Wrapping
/// is floor based, so a column right at the sheet edge can be selected when
/// `frame_width` does not divide the width evenly.
///
/// Returns `None` when not even one frame fits across the sheet.
pub fn locate_frame(
    sheet_width: u32,
    start_x: u32,
    start_y: u32,
    frame_width: u32,
    frame_height: u32,
    index: u32,
) -> Option<Frame> {
    if frame_width == 0 || sheet_width < frame_width {
        return None;
    }

    let sheet_width = sheet_width as i64;
    let start_x = start_x as i64;
    let fw = frame_width as i64;
    let mut index = index as i64;
    let mut row = 0i64;

    if (index + 1) * fw + start_x > sheet_width {
        index -= ((sheet_width - start_x) / fw).max(0);
        row += 1;
    }
    let per_row = sheet_width / fw;
    while (index + 1) * fw > sheet_width {
        index -= per_row;
        row += 1;
    }

    let offset = if row == 0 { start_x } else { 0 };
    Some(Frame {
        x: (index * fw + offset) as u32,
        y: (row * frame_height as i64) as u32 + start_y,
        width: frame_width,
        height: frame_height,
    })
}
