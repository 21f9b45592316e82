//! Page rendering orchestration.

use pdfraster_parse::{PdfFile, RenderError, process_content_stream};
use tracing::debug;

use crate::device::RasterDevice;

/// Options controlling a page render.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Raster resolution in dots per inch. 72 renders one pixel per
    /// user-space unit.
    pub dpi: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { dpi: 72 }
    }
}

/// Render one page (1-based `page_number`) to a raster device.
///
/// Fatal errors come only from the lifecycle: a missing page, a missing
/// MediaBox, or an unreadable content stream. Operator-level problems
/// inside the stream are logged and rendering continues.
pub fn render_page(
    pdf: &PdfFile,
    page_number: u32,
    options: &RenderOptions,
) -> Result<RasterDevice, RenderError> {
    let page_id = pdf.page(page_number)?;
    let media_box = pdf.media_box(page_id)?;
    let content = pdf.content(page_id)?;
    let resources = pdf.resources(page_id);

    debug!(
        page = page_number,
        width = media_box.width(),
        height = media_box.height(),
        dpi = options.dpi,
        "rendering page"
    );

    let mut device = RasterDevice::new(media_box, options.dpi)?;
    process_content_stream(&mut device, &content, &resources);
    Ok(device)
}
