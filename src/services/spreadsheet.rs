//! Workbook reading (roster upload) and writing (attendance export).

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx, open_workbook_from_rs};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_xlsxwriter::Workbook;

use crate::error::{RowError, ServiceError};

pub const EXPORT_SHEET_NAME: &str = "Attendance";
pub const EXPORT_HEADER: [&str; 3] = ["Register No", "Student Name", "Status"];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One non-blank roster row, in upload column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    /// 1-based spreadsheet row number, header included.
    pub row: usize,
    pub reg_no: String,
    pub name: String,
    pub year: String,
    pub branch: String,
    pub section: String,
    pub hall: String,
    pub subject: String,
    pub exam_date: NaiveDate,
    pub session: String,
}

#[derive(Debug, Default)]
pub struct RosterSheet {
    pub rows: Vec<RosterRow>,
    pub errors: Vec<RowError>,
    pub skipped_blank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub reg_no: String,
    pub name: String,
    pub status: String,
}

/// Text of a cell. Whole numbers print without a fraction so numeric
/// registration numbers survive.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::Error(e) => format!("{:?}", e),
        Data::Empty => String::new(),
    }
}

/// Converts a spreadsheet day serial to a date, dropping any time fraction.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // Serials below 61 predate the phantom 1900-02-29
    let epoch = if serial < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Parses a plain date, or a timestamp truncated to its date.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
}

pub fn cell_date(cell: &Data) -> Result<NaiveDate, String> {
    match cell {
        Data::Empty => Err("Missing exam date".to_string()),
        Data::String(s) | Data::DateTimeIso(s) => {
            parse_date_text(s).ok_or_else(|| format!("Invalid exam date '{}'", s.trim()))
        }
        // as_datetime honours the workbook's 1904 date system
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date())
            .ok_or_else(|| format!("Invalid exam date '{}'", cell_text(cell))),
        Data::Float(_) | Data::Int(_) => cell
            .as_f64()
            .and_then(excel_serial_to_date)
            .ok_or_else(|| format!("Invalid exam date '{}'", cell_text(cell))),
        other => Err(format!("Invalid exam date '{}'", cell_text(other))),
    }
}

fn parse_row(row_num: usize, row: &[Data]) -> Result<RosterRow, String> {
    let text = |col: usize| row.get(col).map(cell_text).unwrap_or_default();
    let exam_date = cell_date(row.get(7).unwrap_or(&Data::Empty))?;

    Ok(RosterRow {
        row: row_num,
        reg_no: text(0),
        name: text(1),
        year: text(2),
        branch: text(3),
        section: text(4),
        hall: text(5),
        subject: text(6),
        exam_date,
        session: text(8),
    })
}

/// Reads the first sheet of an xlsx roster. The header row is ignored and
/// rows with an empty registration number are counted as blank.
pub fn read_roster(bytes: &[u8]) -> Result<RosterSheet, ServiceError> {
    if bytes.is_empty() {
        return Err(ServiceError::MalformedInput(
            "Uploaded file is empty".to_string(),
        ));
    }

    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(|e| {
        ServiceError::MalformedInput(format!("Failed to open Excel file: {}", e))
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| ServiceError::MalformedInput("Excel file has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| ServiceError::MalformedInput(format!("Failed to read sheet: {}", e)))?;

    // Ranges start at the first used cell, not necessarily A1
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut sheet = RosterSheet::default();
    for (idx, row) in range.rows().enumerate() {
        let row_num = first_row + idx + 1;
        if row_num == 1 {
            continue;
        }

        let reg_no = row.first().map(cell_text).unwrap_or_default();
        if reg_no.is_empty() {
            sheet.skipped_blank += 1;
            continue;
        }

        match parse_row(row_num, row) {
            Ok(parsed) => sheet.rows.push(parsed),
            Err(error) => sheet.errors.push(RowError {
                row: row_num,
                reg_no,
                error,
            }),
        }
    }

    Ok(sheet)
}

/// Builds the attendance workbook: header row, then one row per record in
/// the given order.
pub fn write_attendance(rows: &[ExportRow]) -> Result<Vec<u8>, ServiceError> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| ServiceError::Spreadsheet(e.to_string());

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME).map_err(xlsx_err)?;

    for (col, title) in EXPORT_HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title).map_err(xlsx_err)?;
    }

    for (idx, record) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &record.reg_no).map_err(xlsx_err)?;
        worksheet.write_string(row, 1, &record.name).map_err(xlsx_err)?;
        worksheet.write_string(row, 2, &record.status).map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_timestamps_truncate_to_date() {
        assert_eq!(parse_date_text("2026-05-04 09:30:00"), Some(date(2026, 5, 4)));
        assert_eq!(parse_date_text("2026-05-04T14:00:00"), Some(date(2026, 5, 4)));
        assert_eq!(parse_date_text("2026-05-04"), Some(date(2026, 5, 4)));
        assert_eq!(parse_date_text("04/05/2026"), Some(date(2026, 5, 4)));
        assert_eq!(parse_date_text("next tuesday"), None);
    }

    #[test]
    fn test_serial_dates() {
        // 46146 is 2026-05-04; .375 is 09:00
        assert_eq!(excel_serial_to_date(46146.0), Some(date(2026, 5, 4)));
        assert_eq!(excel_serial_to_date(46146.375), Some(date(2026, 5, 4)));
        assert_eq!(excel_serial_to_date(1.0), Some(date(1900, 1, 1)));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(cell_date(&Data::Float(46146.5)), Ok(date(2026, 5, 4)));
        assert!(cell_date(&Data::Empty).is_err());
    }

    #[test]
    fn test_date_formatted_cells_truncate_to_date() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let stamp = rust_xlsxwriter::ExcelDateTime::from_ymd(2026, 5, 4)
            .unwrap()
            .and_hms(9, 30, 0)
            .unwrap();
        let format = rust_xlsxwriter::Format::new().set_num_format("yyyy-mm-dd hh:mm");
        sheet.write_datetime_with_format(0, 0, &stamp, &format).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        let cell = range.get_value((0, 0)).unwrap();
        assert!(matches!(cell, Data::DateTime(_)));
        assert_eq!(cell_date(cell), Ok(date(2026, 5, 4)));
        assert!(cell_text(cell).starts_with("2026-05-04"));
    }

    #[test]
    fn test_numeric_registration_numbers_keep_digits() {
        assert_eq!(cell_text(&Data::Float(127003181.0)), "127003181");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::String("  21CS001 ".into())), "21CS001");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_empty_upload_is_malformed() {
        assert!(matches!(
            read_roster(&[]),
            Err(ServiceError::MalformedInput(_))
        ));
        assert!(matches!(
            read_roster(b"not a workbook"),
            Err(ServiceError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_roster_rows_are_read_after_header() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let header = [
            "Reg No", "Name", "Year", "Branch", "Section", "Hall", "Subject", "Date", "Session",
        ];
        for (col, title) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        let row = [
            "21CS001", "Asha", "II", "CSE", "A", "VKJ 101", "Compiler Design",
            "2026-05-04 09:30:00", "Session 1",
        ];
        for (col, value) in row.iter().enumerate() {
            sheet.write_string(1, col as u16, *value).unwrap();
        }
        // Trailing row with only a name: blank registration number
        sheet.write_string(2, 1, "stray").unwrap();
        sheet.write_string(3, 0, "21CS002").unwrap();
        sheet.write_string(3, 7, "soon").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let roster = read_roster(&bytes).unwrap();
        assert_eq!(roster.skipped_blank, 1);
        assert_eq!(roster.rows.len(), 1);
        let parsed = &roster.rows[0];
        assert_eq!(parsed.row, 2);
        assert_eq!(parsed.reg_no, "21CS001");
        assert_eq!(parsed.exam_date, date(2026, 5, 4));
        assert_eq!(parsed.session, "Session 1");

        assert_eq!(roster.errors.len(), 1);
        assert_eq!(roster.errors[0].row, 4);
        assert_eq!(roster.errors[0].reg_no, "21CS002");
    }

    #[test]
    fn test_export_layout() {
        let rows = vec![ExportRow {
            reg_no: "21CS001".into(),
            name: "Asha".into(),
            status: "Absent".into(),
        }];
        let bytes = write_attendance(&rows).unwrap();

        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![EXPORT_SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(EXPORT_SHEET_NAME).unwrap();
        let cells: Vec<Vec<String>> = range
            .rows()
            .map(|r| r.iter().map(cell_text).collect())
            .collect();
        assert_eq!(
            cells,
            vec![
                vec!["Register No", "Student Name", "Status"],
                vec!["21CS001", "Asha", "Absent"],
            ]
        );
    }
}
