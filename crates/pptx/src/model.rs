//! The mutable in-memory document model.
//!
//! Every top-level child of a slide's shape tree is counted as a shape, even
//! when it carries no text — shape ordinals are the stable addressing
//! contract between extraction and application passes. Mutations go through
//! the `Slide` methods so the slide's dirty flag stays accurate; only dirty
//! slides are re-serialized on save.

/// The parsed presentation: ordered slides plus deck dimensions.
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    pub(crate) slides: Vec<Slide>,
    pub(crate) slide_width: Option<i64>,
    pub(crate) slide_height: Option<i64>,
}

impl Presentation {
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// 0-based slide access.
    pub fn slide(&self, idx: usize) -> Option<&Slide> {
        self.slides.get(idx)
    }

    pub fn slide_mut(&mut self, idx: usize) -> Option<&mut Slide> {
        self.slides.get_mut(idx)
    }

    /// Deck width in EMU, when `p:sldSz` was present.
    pub fn slide_width(&self) -> Option<i64> {
        self.slide_width
    }

    pub fn slide_height(&self) -> Option<i64> {
        self.slide_height
    }
}

/// One slide: its archive part name, shapes in tree order, and notes.
#[derive(Debug, Clone)]
pub struct Slide {
    pub(crate) part_name: String,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) notes: Option<String>,
    pub(crate) dirty: bool,
}

impl Slide {
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set a shape's left position (EMU). Returns false when the shape
    /// ordinal does not exist.
    pub fn set_shape_left(&mut self, shape_idx: usize, left: i64) -> bool {
        match self.shapes.get_mut(shape_idx) {
            Some(shape) => {
                if shape.left != left {
                    shape.left = left;
                    self.dirty = true;
                }
                true
            }
            None => false,
        }
    }

    /// Rewrite text-frame runs of one shape. The closure returns the new
    /// text for a run, or `None` to leave it alone. Returns the number of
    /// runs changed.
    pub fn update_text_runs<F>(&mut self, shape_idx: usize, mut f: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let Some(shape) = self.shapes.get_mut(shape_idx) else {
            return 0;
        };
        let Some(frame) = shape.text_frame.as_mut() else {
            return 0;
        };
        let changed = update_runs(&mut frame.paragraphs, &mut f);
        if changed > 0 {
            self.dirty = true;
        }
        changed
    }

    /// Rewrite table-cell runs of one shape, cell by cell in row order.
    pub fn update_table_runs<F>(&mut self, shape_idx: usize, mut f: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let Some(shape) = self.shapes.get_mut(shape_idx) else {
            return 0;
        };
        let Some(table) = shape.table.as_mut() else {
            return 0;
        };
        let mut changed = 0;
        for row in &mut table.rows {
            for cell in &mut row.cells {
                changed += update_runs(&mut cell.paragraphs, &mut f);
            }
        }
        if changed > 0 {
            self.dirty = true;
        }
        changed
    }
}

fn update_runs<F>(paragraphs: &mut [Paragraph], f: &mut F) -> usize
where
    F: FnMut(&str) -> Option<String>,
{
    let mut changed = 0;
    for para in paragraphs {
        for run in &mut para.runs {
            if let Some(new_text) = f(&run.text)
                && new_text != run.text
            {
                run.text = new_text;
                changed += 1;
            }
        }
    }
    changed
}

/// A positioned element on a slide. Geometry is in EMU; shapes without an
/// explicit transform report zeros (inherited geometry is not resolved).
#[derive(Debug, Clone, Default)]
pub struct Shape {
    pub(crate) name: String,
    pub(crate) left: i64,
    pub(crate) top: i64,
    pub(crate) width: i64,
    pub(crate) height: i64,
    pub(crate) text_frame: Option<TextFrame>,
    pub(crate) table: Option<Table>,
}

impl Shape {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn left(&self) -> i64 {
        self.left
    }

    pub fn top(&self) -> i64 {
        self.top
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn text_frame(&self) -> Option<&TextFrame> {
        self.text_frame.as_ref()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Current run texts in document order, for the save-time XML patch.
    /// A shape holds either a text frame or a table, never both.
    pub(crate) fn run_texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        if let Some(frame) = &self.text_frame {
            collect_run_texts(&frame.paragraphs, &mut texts);
        }
        if let Some(table) = &self.table {
            for row in &table.rows {
                for cell in &row.cells {
                    collect_run_texts(&cell.paragraphs, &mut texts);
                }
            }
        }
        texts
    }
}

fn collect_run_texts<'a>(paragraphs: &'a [Paragraph], out: &mut Vec<&'a str>) {
    for para in paragraphs {
        for run in &para.runs {
            out.push(&run.text);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextFrame {
    pub(crate) paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }
}

#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub(crate) level: u8,
    pub(crate) alignment: Option<String>,
    pub(crate) runs: Vec<Run>,
}

impl Paragraph {
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn alignment(&self) -> Option<&str> {
        self.alignment.as_deref()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Run {
    pub(crate) text: String,
    pub(crate) bold: Option<bool>,
    pub(crate) italic: Option<bool>,
    pub(crate) font_name: Option<String>,
    pub(crate) size_pt: Option<f32>,
}

impl Run {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    pub fn italic(&self) -> Option<bool> {
        self.italic
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    pub fn size_pt(&self) -> Option<f32> {
        self.size_pt
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub(crate) rows: Vec<TableRow>,
}

impl Table {
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Cell text as a rectangular grid.
    pub fn grid(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(TableCell::text).collect())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub(crate) cells: Vec<TableCell>,
}

impl TableRow {
    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableCell {
    pub(crate) paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Cell text, paragraphs joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
