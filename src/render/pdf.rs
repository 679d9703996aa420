use super::{DocumentRenderer, RenderError};
use deckpress_types::PageSize;
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// An in-memory PDF renderer using the `lopdf` library.
///
/// Every page is one raster drawn full-bleed over a MediaBox of the configured
/// physical page size, so the sheet prints at its true scale.
pub struct LopdfDocumentRenderer {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_width_pt: f32,
    page_height_pt: f32,
}

impl LopdfDocumentRenderer {
    pub fn new(page: &PageSize) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let (width, height) = page.to_points();

        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            page_width_pt: width as f32,
            page_height_pt: height as f32,
        }
    }

    fn image_xobject(page: &RgbaImage) -> Result<Stream, RenderError> {
        let rgb: Vec<u8> = page
            .as_raw()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let mut stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => page.width() as i64,
                "Height" => page.height() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            rgb,
        );
        stream.compress()?;
        Ok(stream)
    }
}

impl DocumentRenderer for LopdfDocumentRenderer {
    fn begin_document(&mut self) -> Result<(), RenderError> {
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        let catalog_id = self.document.add_object(catalog_dict);
        self.document.trailer.set("Root", catalog_id);
        Ok(())
    }

    fn render_page(&mut self, page: &RgbaImage) -> Result<(), RenderError> {
        let image_id = self.document.add_object(Self::image_xobject(page)?);

        // Scale the unit image square up to the full MediaBox.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        self.page_width_pt.into(),
                        0.into(),
                        0.into(),
                        self.page_height_pt.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let mut content_stream = Stream::new(dictionary! {}, content.encode()?);
        content_stream.compress()?;
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_width_pt.into(), self.page_height_pt.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        log::debug!("Added PDF page {} ({}x{}px)", self.page_ids.len(), page.width(), page.height());
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn finalize(mut self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        if let Some(Object::Dictionary(pages_dict)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", self.page_ids.len() as i64);
        }
        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
