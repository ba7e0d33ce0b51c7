//! CSL archive files: one quoted row per contact.
//!
//! ```text
//! "CALLSIGN","LOCATOR","EXCHANGE",TIMESWORKED,"DATE1;DATE2;"
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, Trim};
use log::{debug, info, warn};

use crate::{
    contact::{ArchiveEntry, Contact, CountField, CslRow, quote},
    core::store::Archive,
    engine::merge::sort_dates,
    validate::check_line,
};

use super::{Parsed, PersistResult, Warning};

/// Reads padded rows from CSL text, checking each rendered line.
///
/// A leading row with fewer than two fields is treated as a title and
/// skipped. Rows that are not valid UTF-8 are skipped with a warning.
pub fn parse_csl_rows<R: Read>(input: R) -> PersistResult<Parsed<Vec<CslRow>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(b',')
        .quote(b'"')
        .from_reader(input);

    let mut rows = Vec::new();
    let mut warnings = Vec::new();
    let mut record = ByteRecord::new();
    let mut is_first = true;

    while reader.read_byte_record(&mut record)? {
        let line_no = record.position().map(|p| p.line()).unwrap_or(0);
        let first = std::mem::replace(&mut is_first, false);

        let fields = match decode_fields(&record) {
            Some(fields) => fields,
            None => {
                warn!("skipping undecodable CSL line {line_no}");
                warnings.push(Warning::Undecodable { line_no });
                continue;
            }
        };

        if first && fields.len() < 2 {
            debug!("skipping CSL title row");
            continue;
        }

        let row = row_from_fields(fields);
        if let Err(err) = check_line(&row.to_line()) {
            warnings.push(Warning::Line(err));
        }
        rows.push(row);
    }

    Ok(Parsed { value: rows, warnings })
}

/// Reads a CSL archive from any reader.
///
/// A key seen twice keeps the later row and raises [`Warning::Duplicate`].
pub fn parse_csl<R: Read>(input: R) -> PersistResult<Parsed<Archive>> {
    let parsed = parse_csl_rows(input)?;
    let Parsed {
        value: rows,
        mut warnings,
    } = parsed;

    let mut archive = Archive::new();
    for row in rows {
        let (contact, entry) = row.into_entry();
        if archive.set(contact.clone(), entry).is_some() {
            warn!("duplicate CSL row for {contact} replaced an earlier entry");
            warnings.push(Warning::Duplicate { contact });
        }
    }

    Ok(Parsed {
        value: archive,
        warnings,
    })
}

/// Reads the CSL archive at `path`.
pub fn read_csl(path: impl AsRef<Path>) -> PersistResult<Parsed<Archive>> {
    let path = path.as_ref();
    info!("reading archive {}", path.display());
    let parsed = parse_csl(File::open(path)?)?;
    info!(
        "read {} contacts from {} ({} warnings)",
        parsed.value.len(),
        path.display(),
        parsed.warnings.len()
    );
    Ok(parsed)
}

/// Reads the rows of the CSL file at `path` without keying them.
pub fn read_csl_rows(path: impl AsRef<Path>) -> PersistResult<Parsed<Vec<CslRow>>> {
    parse_csl_rows(File::open(path.as_ref())?)
}

/// Canonical line for one archive entry, dates sorted newest first.
pub fn csl_line(contact: &Contact, entry: &ArchiveEntry) -> String {
    format!(
        "{},{},{},{},{}",
        quote(contact.callsign()),
        quote(contact.locator()),
        quote(contact.exchange()),
        entry.times_worked,
        quote(&sort_dates(&entry.dates))
    )
}

/// Renders the whole archive in ascending contact order.
///
/// Placeholder rows (blank callsign and exchange) are left out.
pub fn render_csl(archive: &Archive) -> String {
    let mut out = String::new();
    for contact in archive.sorted_contacts() {
        if contact.is_placeholder() {
            continue;
        }
        if let Some(entry) = archive.get(contact) {
            out.push_str(&csl_line(contact, entry));
            out.push('\n');
        }
    }
    out
}

/// Rewrites the archive at `path`, returning the number of rows written.
///
/// The text goes to a sibling temporary file first and is renamed over
/// `path`, so a failed write leaves the previous archive intact.
pub fn write_csl(path: impl AsRef<Path>, archive: &Archive) -> PersistResult<usize> {
    let path = path.as_ref();
    let text = render_csl(archive);
    let rows = text.lines().count();
    let tmp = temp_sibling(path);

    let written = (|| -> PersistResult<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = written.and_then(|()| fs::rename(&tmp, path).map_err(Into::into)) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    info!("wrote {rows} rows to {}", path.display());
    Ok(rows)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn decode_fields(record: &ByteRecord) -> Option<Vec<String>> {
    record
        .iter()
        .map(|field| std::str::from_utf8(field).ok().map(str::to_string))
        .collect()
}

fn row_from_fields(fields: Vec<String>) -> CslRow {
    let mut fields = fields.into_iter();
    let callsign = fields.next().unwrap_or_default();
    let locator = fields.next().unwrap_or_default();
    let exchange = fields.next().unwrap_or_default();
    let times_worked = fields
        .next()
        .map(|token| CountField::parse(&token))
        .unwrap_or_default();
    let dates = fields.next().unwrap_or_default();

    CslRow {
        callsign,
        locator,
        exchange,
        times_worked,
        dates,
    }
}
