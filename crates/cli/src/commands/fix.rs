//! `deckproof fix` — fixed regex corrections, no model involved.
//!
//! Re-aligns title placeholders to the deck's most common left position and
//! runs the spelling table over every text run and table cell.

use std::path::PathBuf;

use deckproof_pptx::Package;
use deckproof_tools::alignment::{standard_left, title_positions};

use super::default_output_path;
use crate::spellcheck::SpellChecker;

pub fn run(input: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| default_output_path(&input));
    let bar = "=".repeat(80);

    println!("{bar}");
    println!("POWERPOINT CORRECTION RUN");
    println!("{bar}");
    println!("Opening: {}", input.display());

    let mut package = Package::open(&input)?;
    let checker = SpellChecker::new();
    let mut all_corrections: Vec<String> = Vec::new();

    println!();
    println!("Analyzing title positions...");
    let standard = standard_left(&title_positions(&package));
    match standard {
        Some(left) => println!("Standard title left position: {left} EMUs"),
        None => println!("No titles found"),
    }

    let slide_count = package.presentation().slide_count();
    for idx in 0..slide_count {
        let slide_num = idx + 1;
        println!();
        println!("--- Processing Slide {slide_num} ---");

        let Some(slide) = package.presentation_mut().slide_mut(idx) else {
            continue;
        };

        let shape_count = slide.shapes().len();
        for shape_idx in 0..shape_count {
            let name = slide.shapes()[shape_idx].name().to_string();

            // Title alignment
            if name.contains("Title")
                && let Some(standard) = standard
            {
                let left = slide.shapes()[shape_idx].left();
                if left != standard && slide.set_shape_left(shape_idx, standard) {
                    all_corrections.push(format!(
                        "Slide {slide_num}, {name}: Aligned left from {left} to {standard}"
                    ));
                    println!("  Fixed alignment: {name}");
                }
            }

            // Text frame runs
            let mut log: Vec<String> = Vec::new();
            slide.update_text_runs(shape_idx, |text| {
                if text.trim().is_empty() {
                    return None;
                }
                let (fixed, notes) = checker.correct(text);
                if fixed == text {
                    None
                } else {
                    log.extend(notes);
                    Some(fixed)
                }
            });
            for note in log {
                all_corrections.push(format!("Slide {slide_num}, {name}: {note}"));
                println!("  Text fix: {note}");
            }

            // Table cell runs
            let mut log: Vec<String> = Vec::new();
            slide.update_table_runs(shape_idx, |text| {
                if text.trim().is_empty() {
                    return None;
                }
                let (fixed, notes) = checker.correct(text);
                if fixed == text {
                    None
                } else {
                    log.extend(notes);
                    Some(fixed)
                }
            });
            for note in log {
                all_corrections.push(format!("Slide {slide_num}, {name} (table): {note}"));
                println!("  Table fix: {note}");
            }
        }
    }

    println!();
    println!("Saving corrected presentation to: {}", output.display());
    package.save(&output)?;

    println!();
    println!("{bar}");
    println!("CORRECTION SUMMARY");
    println!("{bar}");
    if all_corrections.is_empty() {
        println!("No corrections needed.");
    } else {
        println!("Total corrections made: {}", all_corrections.len());
        for correction in &all_corrections {
            println!("  - {correction}");
        }
    }
    println!();
    println!("Output saved to: {}", output.display());
    println!("{bar}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckproof_pptx::fixtures::deck_bytes;

    #[test]
    fn fix_pass_corrects_text_tables_and_alignment() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.pptx");
        std::fs::write(&input, deck_bytes()).unwrap();
        let output = dir.path().join("fixed.pptx");

        run(input, Some(output.clone())).unwrap();

        let reopened = Package::open(&output).unwrap();
        let slides = reopened.presentation().slides();

        // "Teh" fixed by the table ("quikc"/"tets" are not in the table)
        assert_eq!(
            slides[0].shapes()[0].text_frame().unwrap().paragraphs()[0].text(),
            "the quikc tets"
        );

        // Table cell misspelling fixed
        assert_eq!(
            slides[1].shapes()[1].table().unwrap().grid()[0][0],
            "receive"
        );

        // Misaligned title on slide 3 pulled to the standard position
        assert_eq!(slides[2].shapes()[0].left(), 914_400);
    }

    #[test]
    fn second_fix_pass_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.pptx");
        std::fs::write(&input, deck_bytes()).unwrap();
        let once = dir.path().join("once.pptx");
        let twice = dir.path().join("twice.pptx");

        run(input, Some(once.clone())).unwrap();
        run(once.clone(), Some(twice.clone())).unwrap();

        let first = Package::open(&once).unwrap();
        let second = Package::open(&twice).unwrap();
        assert_eq!(
            first.presentation().slides()[0].shapes()[0]
                .text_frame()
                .unwrap()
                .paragraphs()[0]
                .text(),
            second.presentation().slides()[0].shapes()[0]
                .text_frame()
                .unwrap()
                .paragraphs()[0]
                .text(),
        );
    }
}
