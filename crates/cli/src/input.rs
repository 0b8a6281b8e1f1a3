use anyhow::{bail, Context, Result};
use curvearea::api::{EntityDescriptor, StoredEntity};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Accepted input documents: stored rows (one or many) or a bare descriptor list.
#[derive(Deserialize)]
#[serde(untagged)]
enum InputDoc {
    Rows(Vec<StoredEntity>),
    Row(StoredEntity),
    Descriptors(Vec<EntityDescriptor>),
}

/// Read descriptors from `path`. With `id`, only the stored row with that id
/// is used; rows are otherwise concatenated in file order.
pub fn load_descriptors(path: &Path, id: Option<i64>) -> Result<Vec<EntityDescriptor>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc: InputDoc = serde_json::from_str(&text).with_context(|| {
        format!(
            "{}: expected a descriptor list or stored entity row(s)",
            path.display()
        )
    })?;
    let rows = match doc {
        InputDoc::Descriptors(list) => {
            if id.is_some() {
                bail!("{}: --id needs stored entity rows", path.display());
            }
            return Ok(list);
        }
        InputDoc::Row(row) => vec![row],
        InputDoc::Rows(rows) => rows,
    };
    let mut out = Vec::new();
    let mut matched = false;
    for row in rows.iter().filter(|r| id.map_or(true, |id| r.id == id)) {
        matched = true;
        let list = row
            .descriptors()
            .with_context(|| format!("decoding Data of row {} ({})", row.id, row.name))?;
        tracing::debug!(id = row.id, name = %row.name, entities = list.len(), "loaded row");
        out.extend(list);
    }
    if let (Some(id), false) = (id, matched) {
        bail!("{}: no stored entity with id {id}", path.display());
    }
    Ok(out)
}

/// Write `bytes` to `path`, creating parent directories.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CIRCLE: &str = r#"[{"Type":"Circle","Center":[0,0],"Radius":1}]"#;

    #[test]
    fn reads_bare_descriptor_list() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("list.json");
        fs::write(&p, CIRCLE).unwrap();
        let list = load_descriptors(&p, None).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind, "Circle");
        assert!(load_descriptors(&p, Some(1)).is_err());
    }

    #[test]
    fn reads_rows_and_filters_by_id() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("rows.json");
        let rows = serde_json::json!([
            {"Id": 1, "Name": "a", "Data": CIRCLE, "CreatedAt": "2024-01-01"},
            {"Id": 2, "Name": "b", "Data": r#"[{"Type":"Line","Points":[[0,0],[1,0]]},{"Type":"Line","Points":[[1,0],[1,1]]}]"#, "CreatedAt": "2024-01-02"}
        ]);
        fs::write(&p, serde_json::to_vec(&rows).unwrap()).unwrap();
        assert_eq!(load_descriptors(&p, None).unwrap().len(), 3);
        assert_eq!(load_descriptors(&p, Some(2)).unwrap().len(), 2);
        let err = load_descriptors(&p, Some(9)).unwrap_err();
        assert!(err.to_string().contains("no stored entity with id 9"));
    }

    #[test]
    fn reads_single_row() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("row.json");
        let row = serde_json::json!({"Id": 5, "Name": "c", "Data": CIRCLE});
        fs::write(&p, serde_json::to_vec(&row).unwrap()).unwrap();
        assert_eq!(load_descriptors(&p, Some(5)).unwrap().len(), 1);
    }

    #[test]
    fn rejects_malformed_input() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("bad.json");
        fs::write(&p, "{\"nope\": 1}").unwrap();
        assert!(load_descriptors(&p, None).is_err());
        assert!(load_descriptors(&dir.path().join("missing.json"), None).is_err());
    }

    #[test]
    fn write_output_creates_dirs() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("nested/out/a.svg");
        write_output(&p, b"<svg/>").unwrap();
        assert_eq!(fs::read(&p).unwrap(), b"<svg/>");
    }
}
