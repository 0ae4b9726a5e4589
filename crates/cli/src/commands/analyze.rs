//! `deckproof analyze` — print every slide's text content for review.

use std::path::PathBuf;

use deckproof_pptx::{Package, extract};

pub fn run(input: PathBuf) -> anyhow::Result<()> {
    let package = Package::open(&input)?;
    let slides = extract(&package)?;
    let bar = "=".repeat(80);

    println!("{bar}");
    println!("POWERPOINT CONTENT ANALYSIS");
    println!("{bar}");
    println!("Total Slides: {}", slides.len());
    if let (Some(width), Some(height)) = (
        package.presentation().slide_width(),
        package.presentation().slide_height(),
    ) {
        println!("Slide Size: {width} x {height} EMUs");
    }

    let mut all_texts: Vec<(usize, String, String)> = Vec::new();

    for slide in &slides {
        println!();
        println!("{bar}");
        println!("SLIDE {}", slide.slide_number);
        println!("{bar}");

        if !slide.notes.is_empty() {
            println!("  [NOTES]: {}", preview(&slide.notes, 100));
        }

        for shape in &slide.shapes {
            if !shape.paragraphs.is_empty() {
                println!();
                println!("  Shape: {} (index {})", shape.name, shape.shape_index);
                println!("  Position: left={}, top={}", shape.left, shape.top);
                println!("  Size: width={}, height={}", shape.width, shape.height);
                for para in &shape.paragraphs {
                    let alignment = para.alignment.as_deref().unwrap_or("None");
                    println!(
                        "    [{}, Level {}] \"{}\"",
                        alignment, para.level, para.text
                    );
                    all_texts.push((slide.slide_number, shape.name.clone(), para.text.clone()));
                    for run in &para.runs {
                        println!(
                            "      Run: \"{}\" | Font: {}, Size: {}, Bold: {:?}, Italic: {:?}",
                            run.text,
                            run.font_name.as_deref().unwrap_or("None"),
                            run.size_pt
                                .map(|pt| pt.to_string())
                                .unwrap_or_else(|| "None".into()),
                            run.bold,
                            run.italic,
                        );
                    }
                }
            }

            if let Some(table) = &shape.table {
                println!();
                println!("  Table in {}:", shape.name);
                for (row_idx, row) in table.iter().enumerate() {
                    println!("    Row {row_idx}: {row:?}");
                }
            }
        }
    }

    println!();
    println!("{bar}");
    println!("ALL TEXT CONTENT (for spell check)");
    println!("{bar}");
    for (slide_number, shape, text) in &all_texts {
        println!("Slide {slide_number}, {shape}: \"{text}\"");
    }

    Ok(())
}

fn preview(text: &str, limit: usize) -> String {
    let mut preview: String = text.chars().take(limit).collect();
    if preview.len() < text.len() {
        preview.push_str("...");
    }
    preview
}
