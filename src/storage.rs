// =====================================================================
// File: storage.rs
//
// Description:
//   This module provides file persistence for the product catalog.
//   The whole catalog is written out at shutdown and read back in at
//   startup, one comma-separated line per product:
//
//     id,name,weight,color,location,unitsSold,price,ps0,ps1,ps2,ps3,ps4,psCount
//
//   `ps0..ps4` are the rolling window slots (unused ones hold -1) and
//   `psCount` is the number of valid slots.
//
// Goal:
// 1) Saving writes every product in ascending id order, replacing the
//    previous file in one step (temp file + rename).
// 2) Loading rebuilds the index through its normal insert path.
// 3) A missing file is an empty catalog. Malformed lines are skipped.
// =====================================================================

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, SalesError};
use crate::index::AvlIndex;
use crate::product::{Product, SalesWindow, SALES_WINDOW};

/// Default data file name.
pub const DATA_FILE: &str = "sales_data.txt";

/// Number of comma-separated fields in a persisted line.
pub const FIELD_COUNT: usize = 13;

/// Field delimiter of the line format. Text fields must not contain it.
pub const DELIMITER: char = ',';


/// Encode one product as a persisted line (without the newline).
///
/// Floats use the shortest form that parses back to the same value.
///
/// # Example
/// ```
/// use sales_insight::product::Product;
/// use sales_insight::storage::format_line;
///
/// let mut p = Product::new(4, "Fan", 2.5, "Grey", "Reno", 10, 30.0);
/// p.past_sales.push(7);
/// assert_eq!(format_line(&p), "4,Fan,2.5,Grey,Reno,10,30,7,-1,-1,-1,-1,1");
/// ```
pub fn format_line(product: &Product) -> String {
    let (slots, count) = product.past_sales.to_slots();
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{}",
        product.id,
        product.name,
        product.weight,
        product.color,
        product.location,
        product.units_sold,
        product.price,
        slots[0],
        slots[1],
        slots[2],
        slots[3],
        slots[4],
        count
    )
}


/// Decode one persisted line into a product with its window restored.
///
/// The window is restored raw from the first `psCount` slots, it does
/// not go through the FIFO push.
pub fn parse_line(line: &str) -> Result<Product> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(malformed(
            line,
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        ));
    }

    let id = number(line, "id", fields[0])?;
    let name = text(line, "name", fields[1])?;
    let weight = number(line, "weight", fields[2])?;
    let color = text(line, "color", fields[3])?;
    let location = text(line, "location", fields[4])?;
    let units_sold = number(line, "unitsSold", fields[5])?;
    let price = number(line, "price", fields[6])?;

    let mut slots = [0; SALES_WINDOW];
    for (slot, raw) in slots.iter_mut().zip(&fields[7..7 + SALES_WINDOW]) {
        *slot = number(line, "past sale", raw)?;
    }
    let count: usize = number(line, "psCount", fields[12])?;
    if count > SALES_WINDOW {
        return Err(malformed(line, format!("psCount {count} exceeds {SALES_WINDOW}")));
    }

    let product = Product::new(id, name, weight, color, location, units_sold, price);
    Ok(product.with_past_sales(SalesWindow::restore(slots, count)))
}


fn number<T: std::str::FromStr>(line: &str, field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| malformed(line, format!("bad {field} '{raw}'")))
}

fn text<'a>(line: &str, field: &str, raw: &'a str) -> Result<&'a str> {
    if raw.is_empty() {
        return Err(malformed(line, format!("empty {field}")));
    }
    Ok(raw)
}

fn malformed(line: &str, reason: String) -> SalesError {
    SalesError::MalformedLine {
        line: line.to_string(),
        reason,
    }
}


/// Write every product of `index` to `path` in ascending id order.
///
/// The lines go to a sibling temp file first, which then replaces
/// `path`, so a failed save leaves the previous file intact.
///
/// Returns the number of products written.
pub fn save_catalog(path: &Path, index: &AvlIndex) -> Result<usize> {
    let temp_path = temp_path_for(path);

    // Write the snapshot next to the target
    let file = File::create(&temp_path)?;
    let mut writer = BufWriter::new(file);
    let mut written = 0;
    for product in index.iter() {
        writeln!(writer, "{}", format_line(product))?;
        written += 1;
    }

    // Flush user space buffer, then make sure it hits disk
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;
    info!(path = %path.display(), products = written, "catalog saved");
    Ok(written)
}


/// Rebuild a catalog index from `path`.
///
/// - A missing file yields an empty index.
/// - Lines that fail to parse, and lines repeating an id already
///   loaded, are skipped with a warning.
pub fn load_catalog(path: &Path) -> Result<AvlIndex> {
    let mut index = AvlIndex::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no data file, starting with an empty catalog");
            return Ok(index);
        }
        Err(e) => return Err(e.into()),
    };

    let mut skipped = 0;
    for (line_no, raw) in BufReader::new(file).split(b'\n').enumerate() {
        let line = match String::from_utf8(raw?) {
            Ok(line) => line,
            Err(e) => {
                warn!(path = %path.display(), line = line_no + 1, error = %e, "skipping persisted line");
                skipped += 1;
                continue;
            }
        };
        // Ignore blank lines silently
        if line.trim().is_empty() {
            continue;
        }

        let outcome = parse_line(&line).and_then(|product| index.insert(product));
        if let Err(e) = outcome {
            warn!(path = %path.display(), line = line_no + 1, error = %e, "skipping persisted line");
            skipped += 1;
        }
    }

    info!(path = %path.display(), products = index.len(), skipped, "catalog loaded");
    Ok(index)
}


/// `<path>.tmp` next to the data file.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
