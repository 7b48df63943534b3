use crate::error::ChartError;
use crate::models::{Dimension, Record};
use crate::scene::RetainedScene;
use anyhow::Result;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Anything that can hand the chart its records.
pub trait DataSource {
    fn load(&self) -> Result<Vec<Record>, ChartError>;
}

/// A census CSV on disk.
#[derive(Debug, Clone)]
pub struct CsvFile(pub PathBuf);

impl DataSource for CsvFile {
    fn load(&self) -> Result<Vec<Record>, ChartError> {
        load_csv(&self.0)
    }
}

/// Records already in memory.
impl DataSource for Vec<Record> {
    fn load(&self) -> Result<Vec<Record>, ChartError> {
        Ok(self.clone())
    }
}

/// Load census rows from a CSV file with a header row.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, ChartError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ChartError::DataLoad(format!("{}: {e}", path.display())))?;
    load_csv_reader(file)
}

/// Parse census rows from any reader. Extra columns are ignored; the seven
/// required ones must be present and every metric a finite, non-negative number.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Vec<Record>, ChartError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<Record>().enumerate() {
        let row_no = i + 1;
        let record = row.map_err(|e| ChartError::DataLoad(format!("row {row_no}: {e}")))?;
        for dim in Dimension::ALL {
            let v = record.value(dim);
            if !v.is_finite() || v < 0.0 {
                return Err(ChartError::DataLoad(format!(
                    "row {row_no} ({}): {} = {v} is not a usable value",
                    record.abbreviation, dim
                )));
            }
        }
        out.push(record);
    }
    Ok(out)
}

/// Save a scene snapshot as pretty JSON.
pub fn save_scene_json<P: AsRef<Path>>(scene: &RetainedScene, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(scene)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "id,state,abbr,poverty,povertyMoe,age,income,healthcare,obesity,smokes\n\
                   1,Alabama,AL,18.1,0.4,38.1,43000,11.1,32.4,21.1\n";
        let rows = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].abbreviation, "AL");
        assert_eq!(rows[0].income, 43000.0);
    }

    #[test]
    fn snapshot_is_written() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("scene.json");
        save_scene_json(&RetainedScene::new(), &p).unwrap();
        let text = std::fs::read_to_string(&p).unwrap();
        assert!(text.contains("\"nodes\""));
    }
}
