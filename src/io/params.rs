//! CSV ingest/export of marginal parameter tables.
//!
//! Expected columns (header names are matched case-sensitively after trimming):
//!
//! - `cmp`, `loc`, `dir`: required row key
//! - `Units`: unit of the random variable (falls back to `--default-unit`)
//! - `ArgUnits`: optional unit of the arguments of a tabulated `Theta_0`
//! - `Family`, `Theta_0`, `Theta_1`, `Theta_2`, `TruncateLower`, `TruncateUpper`
//!
//! Empty cells mean "not set". Any malformed cell fails the whole file; the
//! row and the key are named in the error.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;
use crate::params::{Family, MarginalRow, MarginalTable, RvKey, Theta};

const KEY_COLUMNS: [&str; 3] = ["cmp", "loc", "dir"];
const PARAM_COLUMNS: [&str; 6] = [
    "Family",
    "Theta_0",
    "Theta_1",
    "Theta_2",
    "TruncateLower",
    "TruncateUpper",
];

/// A parameter table plus its per-row unit series.
#[derive(Debug, Clone)]
pub struct ParamsFile {
    pub table: MarginalTable,
    pub units: Vec<String>,
    /// Present when the file has an `ArgUnits` column.
    pub arg_units: Option<Vec<String>>,
}

pub fn read_params_csv(path: &Path, default_unit: Option<&str>) -> Result<ParamsFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open parameter CSV '{}': {e}", path.display()))
    })?;
    read_params(file, default_unit)
}

pub fn read_params<R: Read>(reader: R, default_unit: Option<&str>) -> Result<ParamsFile, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for name in KEY_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::input(format!("Missing required column: `{name}`")));
        }
    }

    let has_arg_units = header_map.contains_key("ArgUnits");
    let mut rows = Vec::new();
    let mut units = Vec::new();
    let mut arg_units = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: header line, 1-based numbering.
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::input(format!("line {line}: CSV parse error: {e}")))?;

        let key = RvKey::new(
            get_required(&record, &header_map, "cmp", line)?,
            get_required(&record, &header_map, "loc", line)?,
            get_required(&record, &header_map, "dir", line)?,
        );

        let unit = get_optional(&record, &header_map, "Units")
            .or(default_unit)
            .ok_or_else(|| {
                AppError::input(format!(
                    "line {line} ({key}): missing `Units` and no default unit given"
                ))
            })?;
        units.push(unit.to_string());
        if has_arg_units {
            let arg_unit = get_optional(&record, &header_map, "ArgUnits").unwrap_or("");
            arg_units.push(arg_unit.to_string());
        }

        rows.push(parse_row(&record, &header_map, key)?);
    }

    Ok(ParamsFile {
        table: MarginalTable::new(rows),
        units,
        arg_units: has_arg_units.then_some(arg_units),
    })
}

/// Write a parameter table as CSV (key columns plus parameter columns).
pub fn write_params<W: Write>(writer: W, table: &MarginalTable) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);
    let write_err = |e: csv::Error| AppError::input(format!("Failed to write parameter CSV: {e}"));

    out.write_record(KEY_COLUMNS.iter().chain(PARAM_COLUMNS.iter()))
        .map_err(write_err)?;

    for row in table.rows() {
        let fmt_opt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        out.write_record([
            row.key.cmp.clone(),
            row.key.loc.clone(),
            row.key.dir.clone(),
            row.family.map(|f| f.label().to_string()).unwrap_or_default(),
            row.theta_0.as_ref().map(Theta::to_string).unwrap_or_default(),
            fmt_opt(row.theta_1),
            fmt_opt(row.theta_2),
            fmt_opt(row.truncate_lower),
            fmt_opt(row.truncate_upper),
        ])
        .map_err(write_err)?;
    }

    out.flush()
        .map_err(|e| AppError::input(format!("Failed to write parameter CSV: {e}")))?;
    Ok(())
}

pub fn write_params_csv(path: &Path, table: &MarginalTable) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create parameter CSV '{}': {e}", path.display()))
    })?;
    write_params(file, table)
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    key: RvKey,
) -> Result<MarginalRow, AppError> {
    let family = get_optional(record, header_map, "Family")
        .map(str::parse::<Family>)
        .transpose()?;

    let theta_0 = match get_optional(record, header_map, "Theta_0") {
        Some(cell) => Theta::parse_cell(cell)
            .map_err(|reason| AppError::invalid_parameter(format!("{key} Theta_0"), reason))?,
        None => None,
    };

    let number = |column: &str| -> Result<Option<f64>, AppError> {
        parse_opt_f64(get_optional(record, header_map, column))
            .map_err(|reason| AppError::invalid_parameter(format!("{key} {column}"), reason))
    };

    Ok(MarginalRow {
        family,
        theta_0,
        theta_1: number("Theta_1")?,
        theta_2: number("Theta_2")?,
        truncate_lower: number("TruncateLower")?,
        truncate_upper: number("TruncateUpper")?,
        key,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}').to_string(), idx))
        .collect()
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
    line: usize,
) -> Result<&'a str, AppError> {
    get_optional(record, header_map, name)
        .ok_or_else(|| AppError::input(format!("line {line}: missing required value `{name}`")))
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Blank cells and `NaN` are unset; anything else must be a finite number.
fn parse_opt_f64(s: Option<&str>) -> Result<Option<f64>, String> {
    let Some(s) = s else {
        return Ok(None);
    };
    let v: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if v.is_nan() {
        Ok(None)
    } else if v.is_finite() {
        Ok(Some(v))
    } else {
        Err(format!("'{s}' is not finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
cmp,loc,dir,Units,ArgUnits,Family,Theta_0,Theta_1,Theta_2,TruncateLower,TruncateUpper
A,0,1,ea,,,1.0,,,,
B,0,1,ft,,normal,,1.0,,-0.5,0.5
C,0,1,in,,lognormal,1.0,0.5,,0.5,1.5
E,1,2,USD_2011,ea,lognormal,\"500,400|20,10\",0.3,,,
";

    #[test]
    fn reads_units_and_rows() {
        let file = read_params(SAMPLE.as_bytes(), None).unwrap();

        assert_eq!(file.table.len(), 4);
        assert_eq!(file.units, ["ea", "ft", "in", "USD_2011"]);
        let expected: Vec<String> = ["", "", "", "ea"].map(String::from).to_vec();
        assert_eq!(file.arg_units, Some(expected));

        let b = file.table.get(&RvKey::new("B", "0", "1")).unwrap();
        assert_eq!(b.family, Some(Family::Normal));
        assert_eq!(b.theta_0, None);
        assert_eq!(b.truncate_lower, Some(-0.5));

        let e = file.table.get(&RvKey::new("E", "1", "2")).unwrap();
        assert!(matches!(e.theta_0, Some(Theta::Tabulated(_))));
    }

    #[test]
    fn default_unit_fills_blanks() {
        let csv = "cmp,loc,dir,Theta_0\nA,0,1,2.0\n";
        let file = read_params(csv.as_bytes(), Some("ft")).unwrap();
        assert_eq!(file.units, ["ft"]);
        assert!(file.arg_units.is_none());

        assert!(matches!(read_params(csv.as_bytes(), None), Err(AppError::Input(_))));
    }

    #[test]
    fn unknown_family_is_unsupported_distribution() {
        let csv = "cmp,loc,dir,Units,Family,Theta_0\nA,0,1,ea,gamma,1.0\n";
        assert!(matches!(
            read_params(csv.as_bytes(), None),
            Err(AppError::UnsupportedDistribution(f)) if f == "gamma"
        ));
    }

    #[test]
    fn bad_theta_names_the_row() {
        let csv = "cmp,loc,dir,Units,Theta_1\nA,0,1,ea,abc\n";
        match read_params(csv.as_bytes(), None) {
            Err(AppError::InvalidParameter { key, .. }) => assert_eq!(key, "A-0-1 Theta_1"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_key_column() {
        let csv = "cmp,loc,Units\nA,0,ea\n";
        assert!(matches!(read_params(csv.as_bytes(), None), Err(AppError::Input(_))));
    }

    #[test]
    fn writes_blank_cells_for_unset_values() {
        let table = read_params(SAMPLE.as_bytes(), None).unwrap().table;
        let mut buf = Vec::new();
        write_params(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "cmp,loc,dir,Family,Theta_0,Theta_1,Theta_2,TruncateLower,TruncateUpper"
        );
        assert_eq!(lines[1], "A,0,1,,1,,,,");
        assert_eq!(lines[4], "E,1,2,lognormal,\"500,400|20,10\",0.3,,,");
    }
}
