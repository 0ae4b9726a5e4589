//! Save-time slide patching.
//!
//! A dirty slide is re-serialized by replaying its original XML events and
//! substituting the model's current state in exactly two places: run text
//! (`a:t` inside `a:r`) and the shape's first `a:off/@x`. Everything else —
//! attribute order, namespaces, untouched shapes — passes through verbatim.
//!
//! The walk counts shapes and runs with the same rules as `parser.rs`; a
//! run with no recorded counterpart (e.g. inside a group shape) passes
//! through untouched.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use deckproof_core::DocumentError;

use crate::model::Slide;
use crate::parser::{is_shape_tag, local_name, xml_err};

struct ShapePatch<'a> {
    left: i64,
    runs: Vec<&'a str>,
}

pub(crate) fn patch_slide_xml(xml: &str, slide: &Slide) -> Result<String, DocumentError> {
    let part = slide.part_name();
    let patches: Vec<ShapePatch<'_>> = slide
        .shapes()
        .iter()
        .map(|s| ShapePatch {
            left: s.left(),
            runs: s.run_texts(),
        })
        .collect();

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    let mut shape_depth = 0usize;
    let mut group_shape = false;
    let mut current: Option<usize> = None;
    let mut next_ordinal = 0usize;
    let mut off_patched = false;
    let mut in_run = false;
    let mut in_t = false;
    let mut text_written = false;
    let mut run_cursor = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let ln = {
                    let name = e.name();
                    local_name(name.as_ref()).to_vec()
                };
                if is_shape_tag(&ln) {
                    if shape_depth == 0 {
                        current = Some(next_ordinal);
                        next_ordinal += 1;
                        group_shape = ln == b"grpSp";
                        off_patched = false;
                        run_cursor = 0;
                    }
                    shape_depth += 1;
                } else if ln == b"r" && shape_depth == 1 && !group_shape {
                    in_run = true;
                } else if ln == b"t" && in_run {
                    in_t = true;
                    text_written = false;
                } else if ln == b"off"
                    && shape_depth == 1
                    && !off_patched
                    && let Some(idx) = current
                    && let Some(patch) = patches.get(idx)
                {
                    let (patched, did) = patch_off(&e, patch.left, part)?;
                    off_patched = did;
                    writer
                        .write_event(Event::Start(patched))
                        .map_err(|err| xml_err(part, err))?;
                    continue;
                }
                writer
                    .write_event(Event::Start(e))
                    .map_err(|err| xml_err(part, err))?;
            }
            Ok(Event::Empty(e)) => {
                let ln = {
                    let name = e.name();
                    local_name(name.as_ref()).to_vec()
                };
                if ln == b"off"
                    && shape_depth == 1
                    && !off_patched
                    && let Some(idx) = current
                    && let Some(patch) = patches.get(idx)
                {
                    let (patched, did) = patch_off(&e, patch.left, part)?;
                    off_patched = did;
                    writer
                        .write_event(Event::Empty(patched))
                        .map_err(|err| xml_err(part, err))?;
                } else {
                    writer
                        .write_event(Event::Empty(e))
                        .map_err(|err| xml_err(part, err))?;
                }
            }
            Ok(Event::Text(t)) => {
                if in_t {
                    let replacement = current
                        .and_then(|idx| patches.get(idx))
                        .and_then(|p| p.runs.get(run_cursor))
                        .copied();
                    match replacement {
                        Some(new_text) => {
                            if !text_written {
                                writer
                                    .write_event(Event::Text(BytesText::new(new_text)))
                                    .map_err(|err| xml_err(part, err))?;
                                text_written = true;
                            }
                            // further fragments of this a:t are consumed
                        }
                        None => {
                            writer
                                .write_event(Event::Text(t))
                                .map_err(|err| xml_err(part, err))?;
                        }
                    }
                } else {
                    writer
                        .write_event(Event::Text(t))
                        .map_err(|err| xml_err(part, err))?;
                }
            }
            Ok(Event::End(e)) => {
                let ln = {
                    let name = e.name();
                    local_name(name.as_ref()).to_vec()
                };
                if is_shape_tag(&ln) {
                    shape_depth = shape_depth.saturating_sub(1);
                    if shape_depth == 0 {
                        current = None;
                        group_shape = false;
                        in_run = false;
                        in_t = false;
                    }
                } else if ln == b"t" {
                    in_t = false;
                } else if ln == b"r" && in_run {
                    in_run = false;
                    run_cursor += 1;
                }
                writer
                    .write_event(Event::End(e))
                    .map_err(|err| xml_err(part, err))?;
            }
            Ok(Event::Eof) => break,
            Ok(other) => {
                writer
                    .write_event(other)
                    .map_err(|err| xml_err(part, err))?;
            }
            Err(e) => return Err(xml_err(part, e)),
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| xml_err(part, format!("patched XML is not UTF-8: {e}")))
}

/// Rebuild an `a:off` element with the patched `x` attribute. Returns the
/// new element and whether an `x` attribute was actually present.
fn patch_off(
    e: &BytesStart,
    left: i64,
    part: &str,
) -> Result<(BytesStart<'static>, bool), DocumentError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);
    let mut had_x = false;
    let left_value = left.to_string();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_err(part, err))?;
        if attr.key.as_ref() == b"x" {
            had_x = true;
            out.push_attribute(("x", left_value.as_str()));
        } else {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = String::from_utf8_lossy(&attr.value).into_owned();
            out.push_attribute((key.as_str(), value.as_str()));
        }
    }

    Ok((out, had_x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_shapes;

    const SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><p:cSld><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr><p:spPr><a:xfrm><a:off x="914400" y="457200"/><a:ext cx="7315200" cy="1143000"/></a:xfrm></p:spPr><p:txBody><a:p><a:r><a:rPr b="1"/><a:t>Teh quikc tets</a:t></a:r></a:p></p:txBody></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Body 1"/></p:nvSpPr><p:spPr><a:xfrm><a:off x="100" y="200"/><a:ext cx="300" cy="400"/></a:xfrm></p:spPr><p:txBody><a:p><a:r><a:t>untouched</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;

    fn slide_from(xml: &str) -> Slide {
        Slide {
            part_name: "ppt/slides/slide1.xml".into(),
            shapes: parse_shapes(xml, "ppt/slides/slide1.xml").unwrap(),
            notes: None,
            dirty: false,
        }
    }

    #[test]
    fn untouched_slide_round_trips_text() {
        let slide = slide_from(SLIDE);
        let patched = patch_slide_xml(SLIDE, &slide).unwrap();
        // Same text, same offsets
        assert!(patched.contains("Teh quikc tets"));
        assert!(patched.contains("untouched"));
        assert!(patched.contains(r#"x="914400""#));
    }

    #[test]
    fn patches_only_the_targeted_run() {
        let mut slide = slide_from(SLIDE);
        slide.update_text_runs(0, |text| {
            text.contains("Teh").then(|| text.replace("Teh", "the"))
        });
        let patched = patch_slide_xml(SLIDE, &slide).unwrap();
        assert!(patched.contains("the quikc tets"));
        assert!(!patched.contains("Teh quikc tets"));
        assert!(patched.contains("untouched"));
    }

    #[test]
    fn patches_left_offset() {
        let mut slide = slide_from(SLIDE);
        assert!(slide.set_shape_left(1, 914_400));
        let patched = patch_slide_xml(SLIDE, &slide).unwrap();
        // Second shape moved; first kept
        let reparsed = parse_shapes(&patched, "s").unwrap();
        assert_eq!(reparsed[0].left(), 914_400);
        assert_eq!(reparsed[1].left(), 914_400);
        assert_eq!(reparsed[1].top(), 200);
    }

    #[test]
    fn patch_then_reparse_is_stable() {
        let mut slide = slide_from(SLIDE);
        slide.update_text_runs(0, |text| Some(text.replace("quikc", "quick")));
        let patched = parse_then_patch(&slide);
        let reparsed = parse_shapes(&patched, "s").unwrap();
        assert_eq!(
            reparsed[0].text_frame().unwrap().paragraphs()[0].text(),
            "Teh quick tets"
        );
        assert_eq!(
            reparsed[1].text_frame().unwrap().paragraphs()[0].text(),
            "untouched"
        );
    }

    fn parse_then_patch(slide: &Slide) -> String {
        patch_slide_xml(SLIDE, slide).unwrap()
    }

    #[test]
    fn escapes_replacement_text() {
        let mut slide = slide_from(SLIDE);
        slide.update_text_runs(0, |_| Some("A & B < C".to_string()));
        let patched = patch_slide_xml(SLIDE, &slide).unwrap();
        assert!(patched.contains("A &amp; B &lt; C"));
        let reparsed = parse_shapes(&patched, "s").unwrap();
        assert_eq!(
            reparsed[0].text_frame().unwrap().paragraphs()[0].text(),
            "A & B < C"
        );
    }
}
