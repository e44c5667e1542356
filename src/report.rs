//! Output table and console lines.

use crate::location::Coordinate;
use crate::record::ResolvedRecord;
use crate::search::MinimumRatio;
use std::io;
use std::path::Path;

/// Column order is part of the output contract.
pub const CSV_HEADER: [&str; 4] = [
    "Namesake",
    "Original",
    "Namesake Coordinates",
    "Original Coordinates",
];

fn coordinate_cell(coord: Option<Coordinate>) -> String {
    coord.map(|c| c.to_string()).unwrap_or_default()
}

/// One row per record; unresolved coordinates are left empty.
pub fn write_csv_to<W: io::Write>(writer: W, records: &[ResolvedRecord]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        let namesake_coord = coordinate_cell(r.namesake_coord);
        let original_coord = coordinate_cell(r.original_coord);
        wtr.write_record([
            r.namesake.as_str(),
            r.original.as_str(),
            namesake_coord.as_str(),
            original_coord.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, records: &[ResolvedRecord]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_csv_to(io::BufWriter::new(file), records)
}

// ─── Console ─────────────────────────────────────────────────────

pub fn progress_line(index: usize, total: usize, namesake: &str, original: &str) -> String {
    format!("{}/{} {} --> {}", index, total, namesake, original)
}

fn distance_lines(best: &MinimumRatio) -> [String; 2] {
    [
        format!(
            "{} and {} are {:.0}km apart, whereas",
            best.first.namesake, best.second.namesake, best.namesake_distance_km
        ),
        format!(
            "{} and {} are {:.0}km apart",
            best.first.original, best.second.original, best.original_distance_km
        ),
    ]
}

fn ratio_line(best: &MinimumRatio) -> String {
    format!("Ratio: {:.5}", best.inverse())
}

/// Printed whenever the running best improves.
pub fn improvement_lines(best: &MinimumRatio) -> String {
    let [namesakes, originals] = distance_lines(best);
    format!("{}\n{}\n{}", ratio_line(best), namesakes, originals)
}

/// Final three-line summary.
pub fn summary_lines(best: &MinimumRatio) -> String {
    let [namesakes, originals] = distance_lines(best);
    format!("{}\n{}\n{}", namesakes, originals, ratio_line(best))
}
