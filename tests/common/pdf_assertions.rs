use lopdf::{Document as LopdfDocument, Object};

/// MediaBox width and height of every page, in points.
pub fn page_sizes(doc: &LopdfDocument) -> Vec<(f32, f32)> {
    doc.get_pages()
        .values()
        .filter_map(|page_id| {
            let page = doc.get_dictionary(*page_id).ok()?;
            let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
            Some((media_box[2].as_float().ok()?, media_box[3].as_float().ok()?))
        })
        .collect()
}

/// Pixel size of the image XObject drawn on each page.
pub fn page_image_sizes(doc: &LopdfDocument) -> Vec<(i64, i64)> {
    doc.get_pages()
        .values()
        .filter_map(|page_id| {
            let page = doc.get_dictionary(*page_id).ok()?;
            let resources = page.get(b"Resources").ok()?.as_dict().ok()?;
            let xobjects = resources.get(b"XObject").ok()?.as_dict().ok()?;
            let image_id = xobjects.get(b"Im0").ok()?.as_reference().ok()?;
            let Object::Stream(stream) = doc.get_object(image_id).ok()? else {
                return None;
            };
            let width = stream.dict.get(b"Width").ok()?.as_i64().ok()?;
            let height = stream.dict.get(b"Height").ok()?.as_i64().ok()?;
            Some((width, height))
        })
        .collect()
}

pub fn assert_a4_pages(doc: &LopdfDocument) {
    for (width, height) in page_sizes(doc) {
        assert!((width - 595.28).abs() < 0.01, "page width {width}pt is not A4");
        assert!((height - 841.89).abs() < 0.01, "page height {height}pt is not A4");
    }
}
