// Primitives for reading Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::rcv::*;

/// Renders a cell as the text a user would see in the spreadsheet.
///
/// Ranks are often typed as numbers: integral floats are printed without a
/// decimal part so that `1.0` matches the label `"1"`.
pub fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(f) => f.to_string(),
        x => format!("{:?}", x),
    }
}

fn get_range(path: &str, worksheet: Option<&str>) -> RcvResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                worksheet: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
                Ok(wrange.clone())
            }
            l => AmbiguousWorksheetSnafu {
                path,
                count: l.len(),
            }
            .fail(),
        }
    }
}

/// Reads all the rows of a worksheet, including the header row.
pub fn read_xlsx_records(path: &str, worksheet: Option<&str>) -> RcvResult<Vec<Vec<String>>> {
    let wrange = get_range(path, worksheet)?;
    let res: Vec<Vec<String>> = wrange
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    debug!("read_xlsx_records: {} rows", res.len());
    Ok(res)
}
