//! PDF drawing surface built on lopdf
//!
//! Content streams are written as plain PDF operators, one page at a time.
//! Image XObjects are shared across pages, so a card printed twenty times is
//! embedded once.

use crate::constants::{BADGE_STROKE_WIDTH, mm_to_pt};
use crate::layout::Rect;
use crate::types::{Result, Rgb};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::xobject::create_image_xobject;
use super::{RectStyle, Surface};

const FONT_RESOURCE: &str = "F1";

pub struct PdfSurface {
    doc: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    page_width_pt: f32,
    page_height_pt: f32,

    // Current page
    content_ops: Vec<String>,
    xobjects: Dictionary,
    uses_font: bool,

    font_id: Option<ObjectId>,
    image_cache: HashMap<PathBuf, ObjectId>,
}

impl PdfSurface {
    pub fn new(page_width_mm: f32, page_height_mm: f32) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_tree_id = doc.new_object_id();
        Self {
            doc,
            pages_tree_id,
            page_refs: Vec::new(),
            page_width_pt: mm_to_pt(page_width_mm),
            page_height_pt: mm_to_pt(page_height_mm),
            content_ops: Vec::new(),
            xobjects: Dictionary::new(),
            uses_font: false,
            font_id: None,
            image_cache: HashMap::new(),
        }
    }

    /// Build the page tree and catalog.
    ///
    /// Drawing done after the last `show_page` is discarded.
    pub fn finish(mut self) -> Document {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        self.doc
    }

    fn font(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }

        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let id = self.doc.add_object(font_dict);
        self.font_id = Some(id);
        id
    }

    fn image_xobject(&mut self, path: &Path) -> Result<ObjectId> {
        if let Some(&id) = self.image_cache.get(path) {
            return Ok(id);
        }

        let id = create_image_xobject(&mut self.doc, path)?;
        self.image_cache.insert(path.to_owned(), id);
        Ok(id)
    }
}

impl Surface for PdfSurface {
    fn translate(&mut self, dx_mm: f32, dy_mm: f32) {
        self.content_ops.push(format!(
            "1 0 0 1 {} {} cm\n",
            mm_to_pt(dx_mm),
            mm_to_pt(dy_mm)
        ));
    }

    fn rect(&mut self, rect: Rect, style: RectStyle) {
        let mut op = String::from("q ");
        op.push_str(&fill_color(style.fill));

        let paint = match style.stroke {
            Some(stroke) => {
                op.push_str(&stroke_color(stroke));
                op.push_str(&format!("{} w ", BADGE_STROKE_WIDTH));
                "B"
            }
            None => "f",
        };

        op.push_str(&format!(
            "{} {} {} {} re {} Q\n",
            mm_to_pt(rect.x),
            mm_to_pt(rect.y),
            mm_to_pt(rect.width),
            mm_to_pt(rect.height),
            paint
        ));
        self.content_ops.push(op);
    }

    fn image(&mut self, path: &Path, rect: Rect) -> Result<()> {
        let id = self.image_xobject(path)?;
        let name = format!("Im{}", id.0);
        self.xobjects.set(name.as_bytes(), Object::Reference(id));

        self.content_ops.push(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            mm_to_pt(rect.width),
            mm_to_pt(rect.height),
            mm_to_pt(rect.x),
            mm_to_pt(rect.y),
            name
        ));
        Ok(())
    }

    fn text(&mut self, x_mm: f32, y_mm: f32, text: &str, size_pt: f32, color: Rgb) {
        self.uses_font = true;
        self.content_ops.push(format!(
            "q {}BT /{} {} Tf {} {} Td ({}) Tj ET Q\n",
            fill_color(color),
            FONT_RESOURCE,
            size_pt,
            mm_to_pt(x_mm),
            mm_to_pt(y_mm),
            escape_text(text)
        ));
    }

    fn show_page(&mut self) {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.page_width_pt),
                Object::Real(self.page_height_pt),
            ]),
        );

        let mut resources = Dictionary::new();
        let xobjects = std::mem::replace(&mut self.xobjects, Dictionary::new());
        if !xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(xobjects));
        }
        if std::mem::take(&mut self.uses_font) {
            let font_id = self.font();
            let mut fonts = Dictionary::new();
            fonts.set(FONT_RESOURCE, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }

        let content = std::mem::take(&mut self.content_ops).join("");
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
    }

    fn page_count(&self) -> usize {
        self.page_refs.len()
    }
}

fn fill_color(c: Rgb) -> String {
    format!("{} {} {} rg ", c.r, c.g, c.b)
}

fn stroke_color(c: Rgb) -> String {
    format!("{} {} {} RG ", c.r, c.g, c.b)
}

/// Escape a string for a PDF literal; characters outside Latin-1 become `?`
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out
}
