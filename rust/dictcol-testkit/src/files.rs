use std::io::{Seek, SeekFrom, Write};

/// Writes `rows` one per line into a temporary file, positioned at the start.
pub fn write_column_file<S: AsRef<str>>(rows: &[S]) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    for row in rows {
        writeln!(file, "{}", row.as_ref())?;
    }
    file.flush()?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_write_column_file() {
        let file = super::write_column_file(&["a", "b b", ""]).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "a\nb b\n\n");
    }
}
