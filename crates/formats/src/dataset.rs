use chrono::NaiveDate;
use profile::{ProfileRecord, SAMPLED_DEPTHS_M};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Column with the observation date, formatted [`DATE_FORMAT`].
pub const DATE_COLUMN: &str = "date";
/// Column with the instrument's own frost depth estimate, in meters.
pub const FROST_DEPTH_COLUMN: &str = "Zero_Crossing_Depth";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How much of the file survived parsing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DatasetReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn { name: String },
    Empty,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "I/O error: {err}"),
            DatasetError::Csv(err) => write!(f, "CSV error: {err}"),
            DatasetError::MissingColumn { name } => {
                write!(f, "dataset is missing the '{name}' column")
            }
            DatasetError::Empty => write!(f, "dataset contains no usable rows"),
        }
    }
}

impl std::error::Error for DatasetError {}

/// Reads the weekly temperature CSV at `path` into dated profile records.
pub fn load_records(
    path: impl AsRef<Path>,
) -> Result<(Vec<ProfileRecord>, DatasetReport), DatasetError> {
    let file = fs::File::open(path).map_err(DatasetError::Io)?;
    read_records(file)
}

/// Parses CSV text into profile records.
///
/// The header row names each sampled depth by its plain meter value ("0.25",
/// "7"). Blank and non-numeric cells become missing readings; a row whose
/// date does not parse is dropped and counted, everything else is kept.
/// Records come back sorted by date, ties keeping file order.
pub fn read_records<R: Read>(
    reader: R,
) -> Result<(Vec<ProfileRecord>, DatasetReport), DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers().map_err(DatasetError::Csv)?.clone();
    let date_column =
        headers
            .iter()
            .position(|name| name == DATE_COLUMN)
            .ok_or_else(|| DatasetError::MissingColumn {
                name: DATE_COLUMN.to_string(),
            })?;
    let frost_column = headers.iter().position(|name| name == FROST_DEPTH_COLUMN);
    let depth_columns: Vec<Option<usize>> = SAMPLED_DEPTHS_M
        .iter()
        .map(|depth| {
            headers
                .iter()
                .position(|name| name.trim().parse::<f64>().map_or(false, |v| v == *depth))
        })
        .collect();

    let mut records = Vec::new();
    let mut report = DatasetReport::default();

    for row in csv_reader.records() {
        let row = row.map_err(DatasetError::Csv)?;
        report.rows_read += 1;

        let raw_date = row.get(date_column).unwrap_or("");
        let Ok(date) = NaiveDate::parse_from_str(raw_date, DATE_FORMAT) else {
            report.rows_dropped += 1;
            tracing::warn!(
                "row {}: unparseable date {raw_date:?}, dropping",
                report.rows_read
            );
            continue;
        };

        let temperatures_c = depth_columns
            .iter()
            .map(|column| column.and_then(|c| parse_reading(row.get(c))))
            .collect();
        let frost_depth_m = frost_column.and_then(|c| parse_reading(row.get(c)));

        records.push(ProfileRecord::new(date, temperatures_c, frost_depth_m));
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }

    records.sort_by_key(|record| record.date);

    Ok((records, report))
}

/// Hex blake3 fingerprint of the dataset bytes.
pub fn fingerprint(path: impl AsRef<Path>) -> Result<String, DatasetError> {
    let bytes = fs::read(path).map_err(DatasetError::Io)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

fn parse_reading(field: Option<&str>) -> Option<f64> {
    let text = field?.trim();
    if text.is_empty() {
        return None;
    }
    let value: f64 = text.parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::{DatasetError, read_records};
    use chrono::NaiveDate;

    const HEADER: &str = "date,0,0.25,0.5,0.75,1,1.5,2,2.5,3,4,5,6,7,8,9,10,12,15,19,Zero_Crossing_Depth";

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_readings_and_counts_dropped_rows() {
        let csv = format!(
            "{HEADER}\n\
             2008-01-15,-5.1,-4.9,,-4.2,-4.0,-3.1,-2.4,-2.0,-1.6,-1.2,-0.9,-0.7,-0.5,-0.4,-0.3,-0.2,-0.1,-0.1,0.0,0.85\n\
             not-a-date,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1\n\
             2008-02-15,-6.0,,,,,,,,,,,,,,,,,,,\n"
        );

        let (records, report) = read_records(csv.as_bytes()).unwrap();

        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.date, date("2008-01-15"));
        assert_eq!(first.temperatures_c[0], Some(-5.1));
        assert_eq!(first.temperatures_c[2], None);
        assert_eq!(first.frost_depth_m, Some(0.85));

        let second = &records[1];
        assert_eq!(second.temperatures_c[0], Some(-6.0));
        assert_eq!(second.temperatures_c[18], None);
        assert_eq!(second.frost_depth_m, None);
    }

    #[test]
    fn rows_come_back_sorted_by_date() {
        let csv = format!(
            "{HEADER}\n\
             2009-03-01,0,,,,,,,,,,,,,,,,,,,\n\
             2008-01-15,0,,,,,,,,,,,,,,,,,,,\n\
             2008-07-20,0,,,,,,,,,,,,,,,,,,,\n"
        );

        let (records, _) = read_records(csv.as_bytes()).unwrap();

        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date("2008-01-15"), date("2008-07-20"), date("2009-03-01")]
        );
    }

    #[test]
    fn depth_headers_match_by_numeric_value() {
        // "0.50" and "19.0" spell the sampled depths differently but mean
        // the same thing.
        let csv = "date,0.50,19.0\n2010-06-01,1.5,-0.2\n";

        let (records, _) = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0].temperatures_c[2], Some(1.5));
        assert_eq!(records[0].temperatures_c[18], Some(-0.2));
        assert_eq!(records[0].temperatures_c[0], None);
    }

    #[test]
    fn missing_date_column_is_an_error() {
        let csv = "when,0,1\n2008-01-15,1,2\n";

        let err = read_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, DatasetError::MissingColumn { name } if name == "date"));
    }

    #[test]
    fn a_file_with_no_usable_rows_is_empty() {
        let csv = format!("{HEADER}\nnope,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1\n");

        let err = read_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn non_finite_readings_become_missing() {
        let csv = "date,0,Zero_Crossing_Depth\n2010-06-01,NaN,inf\n";

        let (records, _) = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0].temperatures_c[0], None);
        assert_eq!(records[0].frost_depth_m, None);
    }
}
