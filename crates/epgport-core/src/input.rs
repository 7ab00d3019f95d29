// ── CSV input ──
//
// Headered CSV, one static-port binding per record. Column order is free;
// column names must match the `StaticPortRow` field names.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{StaticPortRow, VLAN_RANGE};

/// Read every row of the CSV file at `path`.
pub fn load_rows(path: &Path) -> Result<Vec<StaticPortRow>, CoreError> {
    let file = File::open(path).map_err(|source| CoreError::InputFile {
        path: path.display().to_string(),
        source,
    })?;
    let rows = read_rows(file)?;
    debug!(path = %path.display(), rows = rows.len(), "CSV file loaded");
    Ok(rows)
}

/// Deserialize rows from any reader. Fields are whitespace-trimmed and
/// each row remembers its CSV line.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<StaticPortRow>, CoreError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers().map_err(row_error)?.clone();

    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();
    while csv_reader.read_record(&mut record).map_err(row_error)? {
        let line = record.position().map_or(0, csv::Position::line);
        let mut row: StaticPortRow = record
            .deserialize(Some(&headers))
            .map_err(|err| invalid_row(line, &err))?;
        if !VLAN_RANGE.contains(&row.vlan) {
            return Err(CoreError::InvalidRow {
                line,
                reason: format!(
                    "vlan {} outside {}..={}",
                    row.vlan,
                    VLAN_RANGE.start(),
                    VLAN_RANGE.end()
                ),
            });
        }
        row.line = line;
        rows.push(row);
    }
    Ok(rows)
}

fn row_error(err: csv::Error) -> CoreError {
    invalid_row(err.position().map_or(0, csv::Position::line), &err)
}

fn invalid_row(line: u64, err: &csv::Error) -> CoreError {
    let reason = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("field {}: {err}", field + 1),
            None => err.to_string(),
        },
        _ => err.to_string(),
    };
    CoreError::InvalidRow { line, reason }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const HEADER: &str = "schema,templateName,applicationProfileName,epgName,siteName,podName,nodeName,intfType,intfName,vlan,deploymentImmediacy,mode";

    #[test]
    fn reads_rows_in_order() {
        let csv = format!(
            "{HEADER}\n\
             Prod,T1,AP1,EPG1,DC1,pod-1,node-101,port,eth1/1,100,immediate,regular\n\
             Prod, T1 ,AP1,EPG2,DC1,pod-1,node-101,vpc,VPC_101_102,200,lazy,native\n"
        );
        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].line, rows[1].line), (2, 3));
        assert_eq!(rows[0].epg_name, "EPG1");
        assert_eq!(rows[0].vlan, 100);
        assert_eq!(rows[1].template_name, "T1");
        assert_eq!(rows[1].intf_type, "vpc");
        assert_eq!(rows[1].deployment_immediacy, "lazy");
    }

    #[test]
    fn column_order_is_free() {
        let csv = "vlan,mode,deploymentImmediacy,intfName,intfType,nodeName,podName,siteName,epgName,applicationProfileName,templateName,schema\n\
                   42,regular,immediate,eth1/2,port,node-102,pod-1,DC1,EPG1,AP1,T1,Prod\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].schema, "Prod");
        assert_eq!(rows[0].vlan, 42);
        assert_eq!(rows[0].intf_name, "eth1/2");
    }

    #[test]
    fn non_numeric_vlan_names_the_line() {
        let csv = format!(
            "{HEADER}\n\
             Prod,T1,AP1,EPG1,DC1,pod-1,node-101,port,eth1/1,100,immediate,regular\n\
             Prod,T1,AP1,EPG1,DC1,pod-1,node-101,port,eth1/2,abc,immediate,regular\n"
        );
        let err = read_rows(csv.as_bytes()).unwrap_err();
        match err {
            CoreError::InvalidRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("field 10"), "reason: {reason}");
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_vlan_is_rejected() {
        for vlan in ["0", "4095"] {
            let csv = format!(
                "{HEADER}\n\
                 Prod,T1,AP1,EPG1,DC1,pod-1,node-101,port,eth1/1,100,immediate,regular\n\
                 Prod,T1,AP1,EPG1,DC1,pod-1,node-101,port,eth1/2,{vlan},immediate,regular\n"
            );
            match read_rows(csv.as_bytes()).unwrap_err() {
                CoreError::InvalidRow { line, reason } => {
                    assert_eq!(line, 3);
                    assert!(reason.contains(&format!("vlan {vlan}")), "reason: {reason}");
                }
                other => panic!("expected InvalidRow, got {other:?}"),
            }
        }
    }

    #[test]
    fn vlan_range_bounds_are_accepted() {
        let csv = format!(
            "{HEADER}\n\
             Prod,T1,AP1,EPG1,DC1,pod-1,node-101,port,eth1/1,1,immediate,regular\n\
             Prod,T1,AP1,EPG1,DC1,pod-1,node-101,port,eth1/2,4094,immediate,regular\n"
        );
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!((rows[0].vlan, rows[1].vlan), (1, 4094));
    }

    #[test]
    fn missing_column_is_rejected() {
        let csv = "schema,templateName\nProd,T1\n";
        assert!(matches!(
            read_rows(csv.as_bytes()),
            Err(CoreError::InvalidRow { .. })
        ));
    }

    #[test]
    fn load_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(
            file,
            "Prod,T1,AP1,EPG1,DC1,pod-1,node-101,port,eth1/1,100,immediate,regular"
        )
        .unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_rows(Path::new("/nonexistent/epgport.csv")).unwrap_err();
        assert!(
            matches!(err, CoreError::InputFile { ref path, .. } if path == "/nonexistent/epgport.csv")
        );
    }
}
