//! The `.pptx` package: ZIP container handling.
//!
//! The whole archive is read into memory on open. Slide parts are parsed
//! into the model; everything else is kept as raw bytes so a save can copy
//! untouched entries verbatim and re-serialize only dirty slides.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use deckproof_core::DocumentError;

use crate::model::{Presentation, Slide};
use crate::parser;
use crate::writer::patch_slide_xml;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// An opened presentation package.
#[derive(Debug)]
pub struct Package {
    raw: Vec<u8>,
    presentation: Presentation,
    /// Original XML of each slide part, for save-time patching.
    slide_xml: HashMap<String, String>,
}

impl Package {
    /// Open a `.pptx` file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let raw = std::fs::read(path.as_ref())?;
        Self::from_bytes(raw)
    }

    /// Open a package from in-memory bytes.
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self, DocumentError> {
        let mut archive = ZipArchive::new(Cursor::new(raw.as_slice()))
            .map_err(|e| DocumentError::Zip(e.to_string()))?;

        let pres_xml = read_part(&mut archive, PRESENTATION_PART)?;
        let (slide_ids, slide_width, slide_height) = parser::parse_presentation(&pres_xml)?;

        let rels_xml = read_part(&mut archive, PRESENTATION_RELS_PART)?;
        let rels = parser::parse_slide_relationships(&rels_xml, PRESENTATION_RELS_PART)?;

        let mut slides = Vec::with_capacity(slide_ids.len());
        let mut slide_xml = HashMap::new();

        for rid in &slide_ids {
            let target = rels.get(rid).ok_or_else(|| {
                DocumentError::Extraction(format!("slide relationship {rid} has no target"))
            })?;
            let part = normalize_part_name(target);

            let xml = read_part(&mut archive, &part)?;
            let shapes = parser::parse_shapes(&xml, &part)?;

            let notes_part = part
                .replace("slides/slide", "notesSlides/notesSlide");
            let notes = match read_part_optional(&mut archive, &notes_part)? {
                Some(notes_xml) => parser::parse_notes(&notes_xml, &notes_part)?,
                None => None,
            };

            slides.push(Slide {
                part_name: part.clone(),
                shapes,
                notes,
                dirty: false,
            });
            slide_xml.insert(part, xml);
        }

        debug!(slides = slides.len(), "Opened presentation package");

        Ok(Self {
            raw,
            presentation: Presentation {
                slides,
                slide_width,
                slide_height,
            },
            slide_xml,
        })
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.presentation
    }

    /// Persist the package. Dirty slides are re-serialized; every other
    /// archive entry is copied without recompression.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let persist = |reason: String| DocumentError::Persistence {
            path: path.display().to_string(),
            reason,
        };

        // Patch first so a malformed slide never leaves a half-written file.
        let mut patched: HashMap<&str, String> = HashMap::new();
        for slide in self.presentation.slides() {
            if slide.is_dirty() {
                let xml = self
                    .slide_xml
                    .get(slide.part_name())
                    .ok_or_else(|| persist(format!("missing source for {}", slide.part_name())))?;
                patched.insert(slide.part_name(), patch_slide_xml(xml, slide)?);
            }
        }

        let mut archive = ZipArchive::new(Cursor::new(self.raw.as_slice()))
            .map_err(|e| persist(e.to_string()))?;

        let file = std::fs::File::create(path).map_err(|e| persist(e.to_string()))?;
        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for i in 0..archive.len() {
            let name = {
                let entry = archive.by_index_raw(i).map_err(|e| persist(e.to_string()))?;
                entry.name().to_string()
            };

            if let Some(xml) = patched.get(name.as_str()) {
                debug!(part = %name, "Writing patched slide");
                writer
                    .start_file(name.as_str(), options)
                    .map_err(|e| persist(e.to_string()))?;
                writer
                    .write_all(xml.as_bytes())
                    .map_err(|e| persist(e.to_string()))?;
            } else {
                let entry = archive.by_index_raw(i).map_err(|e| persist(e.to_string()))?;
                writer
                    .raw_copy_file(entry)
                    .map_err(|e| persist(e.to_string()))?;
            }
        }

        writer.finish().map_err(|e| persist(e.to_string()))?;
        Ok(())
    }
}

/// Resolve a relationship target to a package part name.
fn normalize_part_name(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else {
        format!("ppt/{target}")
    }
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    part: &str,
) -> Result<String, DocumentError> {
    let mut file = archive
        .by_name(part)
        .map_err(|e| DocumentError::Zip(format!("missing part '{part}': {e}")))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| DocumentError::Zip(format!("failed to read '{part}': {e}")))?;
    Ok(content)
}

fn read_part_optional<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    part: &str,
) -> Result<Option<String>, DocumentError> {
    match archive.by_name(part) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)
                .map_err(|e| DocumentError::Zip(format!("failed to read '{part}': {e}")))?;
            Ok(Some(content))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(DocumentError::Zip(format!("failed to open '{part}': {e}"))),
    }
}
