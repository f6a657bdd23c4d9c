// Spreadsheet import/export for the contact book
//
// Accepted columns are Name / Phone / CountryCode, matched case-insensitively
// on read. Phone cells are frequently numeric in real spreadsheets and are
// read back as digit strings.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::store::contacts::Contact;
use crate::CoreError;

pub const COLUMNS: [&str; 3] = ["Name", "Phone", "CountryCode"];

struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Read contact candidates from a `.csv`, `.xls` or `.xlsx` file. Rows
/// missing a name or phone are dropped; a file yielding nothing is an error.
pub fn read_contacts(path: &Path) -> Result<Vec<Contact>, CoreError> {
    let table = match extension(path)?.as_str() {
        "csv" => read_csv(path)?,
        "xls" | "xlsx" => read_workbook(path)?,
        other => return Err(CoreError::UnsupportedFile(other.to_string())),
    };
    contacts_from_table(table)
}

/// Write contacts out as `.csv` or `.xlsx`, columns exactly as in `COLUMNS`.
pub fn write_contacts(path: &Path, contacts: &[Contact]) -> Result<(), CoreError> {
    if contacts.is_empty() {
        return Err(CoreError::NothingToExport);
    }
    let rows: Vec<[String; 3]> = contacts
        .iter()
        .map(|c| {
            [
                c.name.clone(),
                c.phone.clone(),
                c.country_code.clone().unwrap_or_default(),
            ]
        })
        .collect();
    write_rows(path, "Contacts", &rows)
}

/// Write the two-row example sheet users fill in before importing.
pub fn write_template(path: &Path) -> Result<(), CoreError> {
    let rows = vec![
        ["John Doe".to_string(), "123456789".to_string(), "+1".to_string()],
        ["Maria Garcia".to_string(), "612345678".to_string(), "+34".to_string()],
    ];
    write_rows(path, "Template", &rows)
}

fn contacts_from_table(table: RawTable) -> Result<Vec<Contact>, CoreError> {
    if table.rows.is_empty() {
        return Err(CoreError::NoContactsInFile);
    }

    let column_index = |name: &str| {
        table
            .headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let missing: Vec<&str> = COLUMNS
        .iter()
        .copied()
        .filter(|c| column_index(c).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::MissingColumns(missing.join(", ")));
    }

    // Presence just checked
    let name_col = column_index(COLUMNS[0]).ok_or(CoreError::NoContactsInFile)?;
    let phone_col = column_index(COLUMNS[1]).ok_or(CoreError::NoContactsInFile)?;
    let country_col = column_index(COLUMNS[2]).ok_or(CoreError::NoContactsInFile)?;

    let cell = |row: &[String], index: usize| -> String {
        row.get(index).map(|v| v.trim().to_string()).unwrap_or_default()
    };

    let contacts: Vec<Contact> = table
        .rows
        .iter()
        .filter_map(|row| {
            let name = cell(row, name_col);
            let phone = cell(row, phone_col);
            if name.is_empty() || phone.is_empty() {
                return None;
            }
            let country = cell(row, country_col);
            let country_code = if country.is_empty() { None } else { Some(country) };
            Some(Contact::new(name, phone, country_code))
        })
        .collect();

    if contacts.is_empty() {
        return Err(CoreError::NoContactsInFile);
    }
    Ok(contacts)
}

fn read_csv(path: &Path) -> Result<RawTable, CoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| CoreError::Sheet(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| CoreError::Sheet(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CoreError::Sheet(e.to_string()))?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}

fn read_workbook(path: &Path) -> Result<RawTable, CoreError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| CoreError::Sheet(e.to_string()))?;

    // First sheet only
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(CoreError::NoContactsInFile)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| CoreError::Sheet(e.to_string()))?;

    let mut lines = range.rows();
    let headers = match lines.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return Err(CoreError::NoContactsInFile),
    };
    let rows = lines
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

// Numeric phone cells must come back as plain digit strings.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn write_rows(path: &Path, sheet_name: &str, rows: &[[String; 3]]) -> Result<(), CoreError> {
    match extension(path)?.as_str() {
        "csv" => write_csv(path, rows),
        "xlsx" => write_xlsx(path, sheet_name, rows),
        other => Err(CoreError::UnsupportedFile(other.to_string())),
    }
}

fn write_csv(path: &Path, rows: &[[String; 3]]) -> Result<(), CoreError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| CoreError::Sheet(e.to_string()))?;
    writer
        .write_record(COLUMNS)
        .map_err(|e| CoreError::Sheet(e.to_string()))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| CoreError::Sheet(e.to_string()))?;
    }
    writer.flush().map_err(|e| CoreError::Sheet(e.to_string()))?;
    Ok(())
}

fn write_xlsx(path: &Path, sheet_name: &str, rows: &[[String; 3]]) -> Result<(), CoreError> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| CoreError::Sheet(e.to_string()))?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| CoreError::Sheet(e.to_string()))?;
    }
    for (row_index, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_index as u32 + 1, col as u16, value)
                .map_err(|e| CoreError::Sheet(e.to_string()))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| CoreError::Sheet(e.to_string()))?;
    Ok(())
}

fn extension(path: &Path) -> Result<String, CoreError> {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .ok_or_else(|| CoreError::UnsupportedFile(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(path: &Path, contents: &str) {
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_csv_import() -> Result<(), CoreError> {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contacts.csv");
        write_file(
            &file,
            "Name,Phone,CountryCode\nAlice,612345678,+34\nBob,5551234567,+1\n",
        );

        let contacts = read_contacts(&file)?;
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Alice");
        assert_eq!(contacts[0].country_code.as_deref(), Some("+34"));
        Ok(())
    }

    #[test]
    fn test_headers_matched_case_insensitively() -> Result<(), CoreError> {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contacts.csv");
        write_file(&file, "name,PHONE,countrycode\nAlice,612345678,+34\n");

        assert_eq!(read_contacts(&file)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_columns_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contacts.csv");
        write_file(&file, "Name,Number\nAlice,612345678\n");

        match read_contacts(&file) {
            Err(CoreError::MissingColumns(cols)) => {
                assert_eq!(cols, "Phone, CountryCode");
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_incomplete_rows_dropped() -> Result<(), CoreError> {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contacts.csv");
        write_file(
            &file,
            "Name,Phone,CountryCode\nAlice,612345678,+34\n,99999999,+1\nNoPhone,,+1\n",
        );

        let contacts = read_contacts(&file)?;
        assert_eq!(contacts.len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_country_code_is_none() -> Result<(), CoreError> {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contacts.csv");
        write_file(&file, "Name,Phone,CountryCode\nAlice,612345678,\n");

        assert!(read_contacts(&file)?[0].country_code.is_none());
        Ok(())
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contacts.csv");
        write_file(&file, "Name,Phone,CountryCode\n");

        assert!(matches!(
            read_contacts(&file),
            Err(CoreError::NoContactsInFile)
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            read_contacts(Path::new("contacts.pdf")),
            Err(CoreError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn test_xlsx_export_then_import() -> Result<(), CoreError> {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contacts.xlsx");

        let contacts = vec![
            Contact::new("Alice".into(), "612345678".into(), Some("+34".into())),
            Contact::new("Bob".into(), "5551234567".into(), None),
        ];
        write_contacts(&file, &contacts)?;

        let read_back = read_contacts(&file)?;
        assert_eq!(read_back.len(), 2);
        assert_eq!(read_back[0].name, "Alice");
        assert_eq!(read_back[1].country_code, None);
        Ok(())
    }

    #[test]
    fn test_export_empty_book_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contacts.csv");
        assert!(matches!(
            write_contacts(&file, &[]),
            Err(CoreError::NothingToExport)
        ));
    }

    #[test]
    fn test_template() -> Result<(), CoreError> {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("template.csv");
        write_template(&file)?;

        let contacts = read_contacts(&file)?;
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "John Doe");
        Ok(())
    }
}
