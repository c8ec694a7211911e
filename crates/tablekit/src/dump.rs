//! CSV export of query results.

use tablekit_core::{stmt::Record, Error, Result};

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Writes records as delimited text.
///
/// The first row is the header, one column per name, followed by one row per
/// record. Each cell is the canonical text form of the record's value for
/// that column (see [`Value::to_text`](tablekit_core::stmt::Value::to_text)),
/// empty when the record does not have it. Cells containing the delimiter, a
/// quote or a line break are quoted, with quotes doubled. Rows end with `\n`.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    delimiter: char,
}

impl Default for CsvExporter {
    fn default() -> Self {
        CsvExporter { delimiter: ',' }
    }
}

impl CsvExporter {
    /// A comma-delimited exporter.
    pub fn new() -> CsvExporter {
        CsvExporter::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> CsvExporter {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Writes the header and the records to `dst`.
    pub fn render<W: Write>(
        &self,
        records: &[Record],
        columns: &[&str],
        mut dst: W,
    ) -> io::Result<()> {
        self.write_row(&mut dst, columns.iter().copied())?;

        for record in records {
            let cells = columns.iter().map(|column| {
                record
                    .get(column)
                    .map(|value| value.to_text())
                    .unwrap_or_default()
            });

            self.write_row(&mut dst, cells)?;
        }

        dst.flush()
    }

    /// Writes the header and the records to the file at `path`, replacing it.
    ///
    /// The content goes to a temporary file next to `path` first, which then
    /// takes the place of the destination, so a failed export leaves any
    /// previous file intact. Returns the number of records written.
    pub fn export(
        &self,
        records: &[Record],
        columns: &[&str],
        path: impl AsRef<Path>,
    ) -> Result<u64> {
        let path = path.as_ref();
        let tmp_path = tmp_path(path);

        let written = File::create(&tmp_path)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                self.render(records, columns, &mut writer)?;
                writer.get_mut().sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, path));

        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(Error::export(path, err));
        }

        Ok(records.len() as u64)
    }

    fn write_row<W, I, S>(&self, dst: &mut W, cells: I) -> io::Result<()>
    where
        W: Write,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut delimiter = None;

        for cell in cells {
            if let Some(delimiter) = delimiter {
                write!(dst, "{delimiter}")?;
            }
            delimiter = Some(self.delimiter);

            let cell = cell.as_ref();

            if self.needs_quotes(cell) {
                write!(dst, "\"{}\"", cell.replace('"', "\"\""))?;
            } else {
                dst.write_all(cell.as_bytes())?;
            }
        }

        dst.write_all(b"\n")
    }

    fn needs_quotes(&self, cell: &str) -> bool {
        cell.chars()
            .any(|c| c == self.delimiter || matches!(c, '"' | '\r' | '\n'))
    }
}

/// `<path>.tmp`, next to `path`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablekit_core::{record, stmt::Value};

    fn render(exporter: &CsvExporter, records: &[Record], columns: &[&str]) -> String {
        let mut dst = vec![];
        exporter.render(records, columns, &mut dst).unwrap();
        String::from_utf8(dst).unwrap()
    }

    #[test]
    fn header_and_rows() {
        let records = [
            record! { "id" => 1, "name" => "John", "age" => 20 },
            record! { "id" => 2, "name" => "Jane" },
        ];

        assert_eq!(
            render(&CsvExporter::new(), &records, &["id", "name", "age"]),
            "id,name,age\n1,John,20\n2,Jane,\n"
        );
    }

    #[test]
    fn header_without_records() {
        assert_eq!(render(&CsvExporter::new(), &[], &["id", "name"]), "id,name\n");
    }

    #[test]
    fn quoting() {
        let records = [record! {
            "a" => "x,y",
            "b" => "say \"hi\"",
            "c" => "two\nlines",
            "d" => Value::Null,
        }];

        assert_eq!(
            render(&CsvExporter::new(), &records, &["a", "b", "c", "d"]),
            "a,b,c,d\n\"x,y\",\"say \"\"hi\"\"\",\"two\nlines\",\n"
        );
    }

    #[test]
    fn custom_delimiter() {
        let records = [record! { "a" => "x,y", "b" => "p;q" }];
        let exporter = CsvExporter::new().with_delimiter(';');

        assert_eq!(exporter.delimiter(), ';');
        assert_eq!(render(&exporter, &records, &["a", "b"]), "a;b\nx,y;\"p;q\"\n");
    }

    #[test]
    fn tmp_path_is_a_sibling() {
        assert_eq!(tmp_path(Path::new("/data/out.csv")), Path::new("/data/out.csv.tmp"));
    }
}
