//! CSV import/export of market datasets.

use std::io::{Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::domain::MarketObservation;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write observations as CSV with a header row.
pub fn write_csv<W: Write>(
    observations: &[MarketObservation],
    writer: W,
) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for obs in observations {
        csv_writer.serialize(obs)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read observations written by [`write_csv`].
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<MarketObservation>, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut observations = Vec::new();
    for record in csv_reader.deserialize() {
        observations.push(record?);
    }
    Ok(observations)
}

pub fn write_csv_file(observations: &[MarketObservation], path: &Path) -> Result<(), DatasetError> {
    let file = std::fs::File::create(path)?;
    write_csv(observations, file)
}

pub fn read_csv_file(path: &Path) -> Result<Vec<MarketObservation>, DatasetError> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::generate;

    #[test]
    fn header_uses_field_names() {
        let mut buf = Vec::new();
        write_csv(&generate(2, 1), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "month,truck_type,is_festival,competitor_rate,fuel_price,load_found,winning_price"
        );
    }

    #[test]
    fn flags_written_as_digits() {
        let mut buf = Vec::new();
        write_csv(&generate(50, 1), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for line in text.lines().skip(1) {
            let cols: Vec<&str> = line.split(',').collect();
            assert!(cols[2] == "0" || cols[2] == "1");
            assert!(cols[5] == "0" || cols[5] == "1");
        }
    }

    #[test]
    fn read_back_matches() {
        let data = generate(20, 9);
        let mut buf = Vec::new();
        write_csv(&data, &mut buf).unwrap();
        let back = read_csv(buf.as_slice()).unwrap();
        assert_eq!(back.len(), data.len());
        assert_eq!(back[0].truck_type, data[0].truck_type);
        assert_eq!(back[0].load_found, data[0].load_found);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market.csv");
        let data = generate(100, 42);
        write_csv_file(&data, &path).unwrap();
        let back = read_csv_file(&path).unwrap();
        assert_eq!(back.len(), 100);
        assert_eq!(
            back.iter().filter(|o| o.load_found).count(),
            data.iter().filter(|o| o.load_found).count()
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
