//! Slide XML → model.
//!
//! One forward pass over the part's events. Shape nesting is tracked with a
//! depth counter so only direct children of `p:spTree` become shapes; the
//! content of group shapes is deliberately not flattened. The save-time
//! patcher in `writer.rs` walks the same events with the same counting
//! rules — the two must stay symmetric.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use deckproof_core::DocumentError;

use crate::model::{Paragraph, Run, Shape, Table, TableCell, TableRow, TextFrame};

/// Strip the namespace prefix from an element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Elements that count as shapes at the `p:spTree` boundary.
pub(crate) fn is_shape_tag(local: &[u8]) -> bool {
    matches!(local, b"sp" | b"pic" | b"graphicFrame" | b"cxnSp" | b"grpSp")
}

pub(crate) fn xml_err(part: &str, err: impl std::fmt::Display) -> DocumentError {
    DocumentError::Xml {
        part: part.to_string(),
        reason: err.to_string(),
    }
}

fn attr_i64(value: &[u8]) -> Option<i64> {
    std::str::from_utf8(value).ok()?.trim().parse().ok()
}

fn attr_string(value: &[u8]) -> String {
    String::from_utf8_lossy(value).into_owned()
}

fn attr_bool(value: &[u8]) -> bool {
    value != b"0" && value != b"false"
}

/// `p:cNvPr` — the shape's display name.
fn read_name_attr(e: &BytesStart) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            return Some(attr_string(&attr.value));
        }
    }
    None
}

/// `a:off` / `a:ext` — a coordinate pair by attribute names.
fn read_pair(e: &BytesStart, first: &[u8], second: &[u8]) -> (Option<i64>, Option<i64>) {
    let mut a = None;
    let mut b = None;
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == first {
            a = attr_i64(&attr.value);
        } else if attr.key.as_ref() == second {
            b = attr_i64(&attr.value);
        }
    }
    (a, b)
}

/// `a:pPr` — indent level and alignment keyword.
fn read_para_props(e: &BytesStart, para: &mut Paragraph) {
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"lvl" => {
                if let Some(lvl) = attr_i64(&attr.value) {
                    para.level = lvl.clamp(0, u8::MAX as i64) as u8;
                }
            }
            b"algn" => para.alignment = Some(attr_string(&attr.value)),
            _ => {}
        }
    }
}

/// `a:rPr` — bold, italic, size in hundredths of a point.
fn read_run_props(e: &BytesStart, run: &mut Run) {
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"b" => run.bold = Some(attr_bool(&attr.value)),
            b"i" => run.italic = Some(attr_bool(&attr.value)),
            b"sz" => {
                if let Some(sz) = attr_i64(&attr.value) {
                    run.size_pt = Some(sz as f32 / 100.0);
                }
            }
            _ => {}
        }
    }
}

/// `a:latin` — the run's font typeface.
fn read_typeface(e: &BytesStart) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"typeface" {
            return Some(attr_string(&attr.value));
        }
    }
    None
}

/// Parse a slide part into its shape list.
pub(crate) fn parse_shapes(xml: &str, part: &str) -> Result<Vec<Shape>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut shapes: Vec<Shape> = Vec::new();

    // Shape nesting; a top-level shape starts when this goes 0 -> 1.
    let mut shape_depth = 0usize;
    let mut group_shape = false;

    let mut cur: Option<Shape> = None;
    let mut off_seen = false;
    let mut ext_seen = false;

    let mut in_tx_body = false;
    let mut in_table = false;
    let mut in_row = false;
    let mut in_cell = false;
    let mut cur_para: Option<Paragraph> = None;
    let mut cur_run: Option<Run> = None;
    let mut in_t = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let ln = {
                    let name = e.name();
                    local_name(name.as_ref()).to_vec()
                };
                match ln.as_slice() {
                    tag if is_shape_tag(tag) => {
                        if shape_depth == 0 {
                            cur = Some(Shape::default());
                            group_shape = tag == b"grpSp";
                            off_seen = false;
                            ext_seen = false;
                        }
                        shape_depth += 1;
                    }
                    b"cNvPr" if shape_depth == 1 => {
                        if let Some(shape) = cur.as_mut()
                            && shape.name.is_empty()
                            && let Some(name) = read_name_attr(e)
                        {
                            shape.name = name;
                        }
                    }
                    b"off" if shape_depth == 1 && !off_seen => {
                        if let Some(shape) = cur.as_mut() {
                            let (x, y) = read_pair(e, b"x", b"y");
                            if x.is_some() || y.is_some() {
                                shape.left = x.unwrap_or_default();
                                shape.top = y.unwrap_or_default();
                                off_seen = true;
                            }
                        }
                    }
                    // Guarded on cx/cy so `a:ext` inside an extension list
                    // (which carries a uri attribute instead) is ignored.
                    b"ext" if shape_depth == 1 && !ext_seen => {
                        if let Some(shape) = cur.as_mut() {
                            let (cx, cy) = read_pair(e, b"cx", b"cy");
                            if cx.is_some() || cy.is_some() {
                                shape.width = cx.unwrap_or_default();
                                shape.height = cy.unwrap_or_default();
                                ext_seen = true;
                            }
                        }
                    }
                    b"txBody" => {
                        if !in_cell && shape_depth == 1 && !group_shape {
                            in_tx_body = true;
                            if let Some(shape) = cur.as_mut()
                                && shape.text_frame.is_none()
                            {
                                shape.text_frame = Some(TextFrame::default());
                            }
                        }
                    }
                    b"p" if in_tx_body || in_cell => {
                        cur_para = Some(Paragraph::default());
                    }
                    b"pPr" => {
                        if let Some(para) = cur_para.as_mut() {
                            read_para_props(e, para);
                        }
                    }
                    b"r" if cur_para.is_some() => {
                        cur_run = Some(Run::default());
                    }
                    b"rPr" => {
                        if let Some(run) = cur_run.as_mut() {
                            read_run_props(e, run);
                        }
                    }
                    b"latin" => {
                        if let Some(run) = cur_run.as_mut()
                            && let Some(face) = read_typeface(e)
                        {
                            run.font_name = Some(face);
                        }
                    }
                    b"t" if cur_run.is_some() => {
                        in_t = true;
                    }
                    b"tbl" if shape_depth == 1 && !group_shape => {
                        in_table = true;
                        if let Some(shape) = cur.as_mut()
                            && shape.table.is_none()
                        {
                            shape.table = Some(Table::default());
                        }
                    }
                    b"tr" if in_table => {
                        in_row = true;
                        if let Some(table) = cur.as_mut().and_then(|s| s.table.as_mut()) {
                            table.rows.push(TableRow::default());
                        }
                    }
                    b"tc" if in_row => {
                        in_cell = true;
                        if let Some(row) = cur
                            .as_mut()
                            .and_then(|s| s.table.as_mut())
                            .and_then(|t| t.rows.last_mut())
                        {
                            row.cells.push(TableCell::default());
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let ln = {
                    let name = e.name();
                    local_name(name.as_ref()).to_vec()
                };
                match ln.as_slice() {
                    b"cNvPr" if shape_depth == 1 => {
                        if let Some(shape) = cur.as_mut()
                            && shape.name.is_empty()
                            && let Some(name) = read_name_attr(e)
                        {
                            shape.name = name;
                        }
                    }
                    b"off" if shape_depth == 1 && !off_seen => {
                        if let Some(shape) = cur.as_mut() {
                            let (x, y) = read_pair(e, b"x", b"y");
                            if x.is_some() || y.is_some() {
                                shape.left = x.unwrap_or_default();
                                shape.top = y.unwrap_or_default();
                                off_seen = true;
                            }
                        }
                    }
                    b"ext" if shape_depth == 1 && !ext_seen => {
                        if let Some(shape) = cur.as_mut() {
                            let (cx, cy) = read_pair(e, b"cx", b"cy");
                            if cx.is_some() || cy.is_some() {
                                shape.width = cx.unwrap_or_default();
                                shape.height = cy.unwrap_or_default();
                                ext_seen = true;
                            }
                        }
                    }
                    b"pPr" => {
                        if let Some(para) = cur_para.as_mut() {
                            read_para_props(e, para);
                        }
                    }
                    b"rPr" => {
                        if let Some(run) = cur_run.as_mut() {
                            read_run_props(e, run);
                        }
                    }
                    b"latin" => {
                        if let Some(run) = cur_run.as_mut()
                            && let Some(face) = read_typeface(e)
                        {
                            run.font_name = Some(face);
                        }
                    }
                    // An empty paragraph or cell still occupies its slot.
                    b"p" if in_tx_body || in_cell => {
                        push_paragraph(&mut cur, in_cell, Paragraph::default());
                    }
                    b"tc" if in_row => {
                        if let Some(row) = cur
                            .as_mut()
                            .and_then(|s| s.table.as_mut())
                            .and_then(|t| t.rows.last_mut())
                        {
                            row.cells.push(TableCell::default());
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref t)) => {
                if in_t && let Some(run) = cur_run.as_mut() {
                    let text = t.unescape().unwrap_or_default();
                    run.text.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let ln = {
                    let name = e.name();
                    local_name(name.as_ref()).to_vec()
                };
                match ln.as_slice() {
                    tag if is_shape_tag(tag) => {
                        shape_depth = shape_depth.saturating_sub(1);
                        if shape_depth == 0 {
                            shapes.push(cur.take().unwrap_or_default());
                            group_shape = false;
                            in_tx_body = false;
                            in_table = false;
                            in_row = false;
                            in_cell = false;
                            cur_para = None;
                            cur_run = None;
                            in_t = false;
                        }
                    }
                    b"t" => in_t = false,
                    b"r" => {
                        if let Some(run) = cur_run.take()
                            && let Some(para) = cur_para.as_mut()
                        {
                            para.runs.push(run);
                        }
                    }
                    b"p" => {
                        if let Some(para) = cur_para.take() {
                            push_paragraph(&mut cur, in_cell, para);
                        }
                    }
                    b"tc" => in_cell = false,
                    b"tr" => in_row = false,
                    b"tbl" => in_table = false,
                    b"txBody" => {
                        if !in_cell {
                            in_tx_body = false;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
    }

    Ok(shapes)
}

fn push_paragraph(cur: &mut Option<Shape>, in_cell: bool, para: Paragraph) {
    let Some(shape) = cur.as_mut() else { return };
    if in_cell {
        if let Some(cell) = shape
            .table
            .as_mut()
            .and_then(|t| t.rows.last_mut())
            .and_then(|r| r.cells.last_mut())
        {
            cell.paragraphs.push(para);
        }
    } else if let Some(frame) = shape.text_frame.as_mut() {
        frame.paragraphs.push(para);
    }
}

/// Parse a notes part into plain text, paragraphs joined with newlines.
pub(crate) fn parse_notes(xml: &str, part: &str) -> Result<Option<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut cur: Option<String> = None;
    let mut in_run = false;
    let mut in_t = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"p" => cur = Some(String::new()),
                    b"r" if cur.is_some() => in_run = true,
                    b"t" if in_run => in_t = true,
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                if local_name(name.as_ref()) == b"p" {
                    paragraphs.push(String::new());
                }
            }
            Ok(Event::Text(ref t)) => {
                if in_t && let Some(text) = cur.as_mut() {
                    text.push_str(&t.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"p" => {
                        if let Some(text) = cur.take() {
                            paragraphs.push(text);
                        }
                    }
                    b"r" => in_run = false,
                    b"t" => in_t = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
    }

    let text = paragraphs.join("\n");
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Parse `ppt/presentation.xml`: ordered slide relationship ids and the
/// deck dimensions from `p:sldSz`.
pub(crate) fn parse_presentation(
    xml: &str,
) -> Result<(Vec<String>, Option<i64>, Option<i64>), DocumentError> {
    let part = "ppt/presentation.xml";
    let mut reader = Reader::from_str(xml);
    let mut slide_ids = Vec::new();
    let mut width = None;
    let mut height = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let ln = {
                    let name = e.name();
                    local_name(name.as_ref()).to_vec()
                };
                match ln.as_slice() {
                    b"sldId" => {
                        for attr in e.attributes().flatten() {
                            if local_name(attr.key.as_ref()) == b"id"
                                && attr.key.as_ref() != b"id"
                            {
                                // r:id — the relationship id; plain `id` is
                                // the slide's numeric identifier.
                                slide_ids.push(attr_string(&attr.value));
                            }
                        }
                    }
                    b"sldSz" => {
                        let (cx, cy) = read_pair(e, b"cx", b"cy");
                        width = cx;
                        height = cy;
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
    }

    Ok((slide_ids, width, height))
}

/// Parse a `.rels` part into an id → target map, slides only.
pub(crate) fn parse_slide_relationships(
    xml: &str,
    part: &str,
) -> Result<std::collections::HashMap<String, String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut rels = std::collections::HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.name();
                if name.as_ref() == b"Relationship" {
                    let mut id = String::new();
                    let mut target = String::new();
                    let mut rel_type = String::new();
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = attr_string(&attr.value),
                            b"Target" => target = attr_string(&attr.value),
                            b"Type" => rel_type = attr_string(&attr.value),
                            _ => {}
                        }
                    }
                    if rel_type.ends_with("/slide") && !id.is_empty() {
                        rels.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
    }

    Ok(rels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn parses_shape_name_geometry_and_runs() {
        let xml = r#"<?xml version="1.0"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <p:cSld><p:spTree>
    <p:sp>
      <p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr>
      <p:spPr><a:xfrm><a:off x="914400" y="457200"/><a:ext cx="7315200" cy="1143000"/></a:xfrm></p:spPr>
      <p:txBody>
        <a:p><a:pPr lvl="1" algn="ctr"/><a:r><a:rPr b="1" i="0" sz="1800"><a:latin typeface="Calibri"/></a:rPr><a:t>Teh Title</a:t></a:r></a:p>
      </p:txBody>
    </p:sp>
  </p:spTree></p:cSld>
</p:sld>"#;
        let shapes = parse_shapes(xml, "ppt/slides/slide1.xml").unwrap();
        assert_eq!(shapes.len(), 1);
        let shape = &shapes[0];
        assert_eq!(shape.name(), "Title 1");
        assert_eq!(shape.left(), 914_400);
        assert_eq!(shape.top(), 457_200);
        assert_eq!(shape.width(), 7_315_200);
        assert_eq!(shape.height(), 1_143_000);

        let paras = shape.text_frame().unwrap().paragraphs();
        assert_eq!(paras.len(), 1);
        assert_eq!(paras[0].level(), 1);
        assert_eq!(paras[0].alignment(), Some("ctr"));
        let run = &paras[0].runs()[0];
        assert_eq!(run.text(), "Teh Title");
        assert_eq!(run.bold(), Some(true));
        assert_eq!(run.italic(), Some(false));
        assert_eq!(run.font_name(), Some("Calibri"));
        assert_eq!(run.size_pt(), Some(18.0));
    }

    #[test]
    fn parses_table_grid() {
        let xml = r#"<?xml version="1.0"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <p:cSld><p:spTree>
    <p:graphicFrame>
      <p:nvGraphicFramePr><p:cNvPr id="4" name="Table 1"/></p:nvGraphicFramePr>
      <p:xfrm><a:off x="100" y="200"/><a:ext cx="300" cy="400"/></p:xfrm>
      <a:graphic><a:graphicData>
        <a:tbl>
          <a:tr><a:tc><a:txBody><a:p><a:r><a:t>Header</a:t></a:r></a:p></a:txBody></a:tc>
                <a:tc><a:txBody><a:p><a:r><a:t>Value</a:t></a:r></a:p></a:txBody></a:tc></a:tr>
          <a:tr><a:tc><a:txBody><a:p><a:r><a:t>row2a</a:t></a:r></a:p></a:txBody></a:tc>
                <a:tc><a:txBody><a:p><a:r><a:t>row2b</a:t></a:r></a:p></a:txBody></a:tc></a:tr>
        </a:tbl>
      </a:graphicData></a:graphic>
    </p:graphicFrame>
  </p:spTree></p:cSld>
</p:sld>"#;
        let shapes = parse_shapes(xml, "ppt/slides/slide1.xml").unwrap();
        assert_eq!(shapes.len(), 1);
        let table = shapes[0].table().unwrap();
        assert_eq!(
            table.grid(),
            vec![
                vec!["Header".to_string(), "Value".to_string()],
                vec!["row2a".to_string(), "row2b".to_string()],
            ]
        );
        assert_eq!(shapes[0].left(), 100);
    }

    #[test]
    fn counts_empty_shapes_for_indexing() {
        // A picture with no text still occupies a shape ordinal.
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:pic><p:nvPicPr><p:cNvPr id="5" name="Picture 1"/></p:nvPicPr>
              <p:spPr><a:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm></p:spPr></p:pic>
            <p:sp><p:nvSpPr><p:cNvPr id="6" name="Body 1"/></p:nvSpPr>
              <p:txBody><a:p><a:r><a:t>hello</a:t></a:r></a:p></p:txBody></p:sp>
        </p:spTree></p:cSld></p:sld>"#;
        let shapes = parse_shapes(xml, "s").unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].name(), "Picture 1");
        assert!(shapes[0].text_frame().is_none());
        assert_eq!(shapes[1].name(), "Body 1");
        assert_eq!(shapes[1].text_frame().unwrap().paragraphs()[0].text(), "hello");
    }

    #[test]
    fn group_content_is_not_flattened() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:grpSp>
              <p:nvGrpSpPr><p:cNvPr id="7" name="Group 1"/></p:nvGrpSpPr>
              <p:grpSpPr><a:xfrm><a:off x="10" y="20"/><a:ext cx="30" cy="40"/></a:xfrm></p:grpSpPr>
              <p:sp><p:nvSpPr><p:cNvPr id="8" name="Inner 1"/></p:nvSpPr>
                <p:txBody><a:p><a:r><a:t>inner text</a:t></a:r></a:p></p:txBody></p:sp>
            </p:grpSp>
        </p:spTree></p:cSld></p:sld>"#;
        let shapes = parse_shapes(xml, "s").unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].name(), "Group 1");
        assert_eq!(shapes[0].left(), 10);
        assert!(shapes[0].text_frame().is_none());
        assert!(shapes[0].run_texts().is_empty());
    }

    #[test]
    fn unescapes_entities_in_run_text() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="Body"/></p:nvSpPr>
              <p:txBody><a:p><a:r><a:t>A &amp; B &lt;ok&gt;</a:t></a:r></a:p></p:txBody></p:sp>
        </p:spTree></p:cSld></p:sld>"#;
        let shapes = parse_shapes(xml, "s").unwrap();
        assert_eq!(
            shapes[0].text_frame().unwrap().paragraphs()[0].text(),
            "A & B <ok>"
        );
    }

    #[test]
    fn field_text_is_not_a_run() {
        // a:fld (slide number etc.) carries a:t but must not count as a run.
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="Footer"/></p:nvSpPr>
              <p:txBody><a:p><a:fld id="{X}" type="slidenum"><a:t>3</a:t></a:fld><a:r><a:t>real</a:t></a:r></a:p></p:txBody></p:sp>
        </p:spTree></p:cSld></p:sld>"#;
        let shapes = parse_shapes(xml, "s").unwrap();
        let runs = &shapes[0].text_frame().unwrap().paragraphs()[0];
        assert_eq!(runs.runs().len(), 1);
        assert_eq!(runs.runs()[0].text(), "real");
    }

    #[test]
    fn notes_paragraphs_join_with_newline() {
        let xml = r#"<p:notes xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:sp><p:txBody>
              <a:p><a:r><a:t>First note</a:t></a:r></a:p>
              <a:p><a:r><a:t>Second note</a:t></a:r></a:p>
            </p:txBody></p:sp>
        </p:spTree></p:cSld></p:notes>"#;
        let notes = parse_notes(xml, "n").unwrap();
        assert_eq!(notes.as_deref(), Some("First note\nSecond note"));
    }

    #[test]
    fn empty_notes_is_none() {
        let xml = r#"<p:notes xmlns:p="p"><p:cSld/></p:notes>"#;
        assert_eq!(parse_notes(xml, "n").unwrap(), None);
    }

    #[test]
    fn presentation_slide_order_and_size() {
        let xml = r#"<p:presentation xmlns:p="p" xmlns:r="r">
            <p:sldIdLst>
              <p:sldId id="256" r:id="rId2"/>
              <p:sldId id="257" r:id="rId3"/>
            </p:sldIdLst>
            <p:sldSz cx="12192000" cy="6858000"/>
        </p:presentation>"#;
        let (ids, w, h) = parse_presentation(xml).unwrap();
        assert_eq!(ids, vec!["rId2".to_string(), "rId3".to_string()]);
        assert_eq!(w, Some(12_192_000));
        assert_eq!(h, Some(6_858_000));
    }

    #[test]
    fn relationships_filter_to_slides() {
        let xml = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
          <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
          <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
          <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/>
        </Relationships>"#;
        let rels = parse_slide_relationships(xml, "rels").unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels["rId2"], "slides/slide1.xml");
        assert_eq!(rels["rId3"], "slides/slide2.xml");
    }
}
