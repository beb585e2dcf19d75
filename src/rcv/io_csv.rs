// Primitives for reading CSV files.

use std::io;

use csv::ReaderBuilder;

use crate::rcv::*;

/// Reads all the records of a CSV file, including the header line.
pub fn read_csv_records(path: &str) -> RcvResult<Vec<Vec<String>>> {
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    collect_records(rdr)
}

pub fn read_csv_records_from<R: io::Read>(reader: R) -> RcvResult<Vec<Vec<String>>> {
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    collect_records(rdr)
}

fn collect_records<R: io::Read>(rdr: csv::Reader<R>) -> RcvResult<Vec<Vec<String>>> {
    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The index starts at 1 to respect most conventions in the spreadsheet world
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_records: {:?} {:?}", lineno, line);
        res.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows() {
        let data = "Timestamp,A,B\nt1,1\nt2,,1,extra\n";
        let rs = read_csv_records_from(data.as_bytes()).unwrap();
        assert_eq!(rs.len(), 3);
        assert_eq!(rs[0], vec!["Timestamp", "A", "B"]);
        assert_eq!(rs[1], vec!["t1", "1"]);
        assert_eq!(rs[2], vec!["t2", "", "1", "extra"]);
    }

    #[test]
    fn quoted_cells() {
        let data = "Timestamp,\"Smith, Jane\",B\nt1,\"1;2\",2\n";
        let rs = read_csv_records_from(data.as_bytes()).unwrap();
        assert_eq!(rs[0][1], "Smith, Jane");
        assert_eq!(rs[1][1], "1;2");
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_csv_records("/nonexistent/ballots.csv"),
            Err(RcvError::CsvOpen { .. })
        ));
    }
}
