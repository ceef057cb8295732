use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use calamine::{open_workbook, Data, Reader, Xlsx};
use log::*;
use rust_xlsxwriter::Workbook;
use tokio::sync::Mutex;

use super::{LedgerKind, LedgerRecord, LedgerValue};
use crate::traits::{LedgerError, LedgerWriter};

/// Stores each ledger as a single-sheet `.xlsx` workbook in `dir`.
///
/// Every append rewrites the whole workbook. Appends to the same ledger are serialised by a per-ledger lock, so this
/// is safe for concurrent requests within one process. The lock is held by the blocking task itself, so a caller that
/// is dropped mid-append cannot let a second writer in while the first is still saving. Nothing coordinates writers in
/// different processes.
#[derive(Debug, Clone)]
pub struct XlsxLedger {
    dir: PathBuf,
    locks: Arc<HashMap<LedgerKind, Arc<Mutex<()>>>>,
}

impl XlsxLedger {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        let locks = LedgerKind::ALL.into_iter().map(|k| (k, Arc::new(Mutex::new(())))).collect();
        Self { dir: dir.into(), locks: Arc::new(locks) }
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }

    async fn run_locked<T, F>(&self, kind: LedgerKind, f: F) -> Result<T, LedgerError>
    where
        T: Send + 'static,
        F: FnOnce(PathBuf, &'static str) -> Result<T, LedgerError> + Send + 'static,
    {
        let lock = self.locks.get(&kind).ok_or_else(|| LedgerError::IoError(format!("No lock for ledger {kind}")))?;
        let guard = Arc::clone(lock).lock_owned().await;
        let path = self.ledger_path(kind);
        let sheet = kind.sheet_name();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            f(path, sheet)
        })
            .await
            .map_err(|e| LedgerError::IoError(format!("Ledger task for {kind} did not complete. {e}")))?
    }
}

impl LedgerWriter for XlsxLedger {
    async fn append(&self, kind: LedgerKind, record: LedgerRecord) -> Result<(), LedgerError> {
        self.run_locked(kind, move |path, sheet| append_row(&path, sheet, record)).await?;
        debug!("📒️ Appended a row to the {kind} ledger");
        Ok(())
    }

    async fn read_all(&self, kind: LedgerKind) -> Result<Vec<LedgerRecord>, LedgerError> {
        self.run_locked(kind, |path, sheet| {
            let sheet = read_sheet(&path, sheet)?;
            Ok(sheet.into_records())
        })
        .await
    }

    fn ledger_path(&self, kind: LedgerKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

/// The decoded contents of one worksheet.
#[derive(Debug, Default)]
struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<LedgerValue>>,
}

impl Sheet {
    /// Adds `record` as the last row, appending a column for every key not already in the header row.
    fn push(&mut self, record: LedgerRecord) {
        for key in record.keys() {
            if !self.headers.iter().any(|h| h == key) {
                self.headers.push(key.to_string());
            }
        }
        let row = self.headers.iter().map(|h| record.get(h).cloned().unwrap_or(LedgerValue::Empty)).collect();
        self.rows.push(row);
    }

    fn into_records(self) -> Vec<LedgerRecord> {
        let Sheet { headers, rows } = self;
        rows.into_iter()
            .map(|row| {
                headers
                    .iter()
                    .zip(row)
                    .filter(|(_, v)| !v.is_empty())
                    .fold(LedgerRecord::new(), |rec, (h, v)| rec.with(h.as_str(), v))
            })
            .collect()
    }
}

fn append_row(path: &Path, sheet_name: &str, record: LedgerRecord) -> Result<(), LedgerError> {
    let mut sheet = read_sheet(path, sheet_name)?;
    sheet.push(record);
    write_sheet(path, sheet_name, &sheet)
}

/// Reads the named worksheet. A missing file or sheet is an empty ledger.
fn read_sheet(path: &Path, sheet_name: &str) -> Result<Sheet, LedgerError> {
    if !path.exists() {
        trace!("📒️ {} does not exist yet", path.display());
        return Ok(Sheet::default());
    }
    let read_err = |e: calamine::XlsxError| LedgerError::ReadError(path.display().to_string(), e.to_string());
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_err)?;
    if !workbook.sheet_names().iter().any(|s| s == sheet_name) {
        warn!("📒️ {} has no sheet called '{sheet_name}'. It will be recreated.", path.display());
        return Ok(Sheet::default());
    }
    let range = workbook.worksheet_range(sheet_name).map_err(read_err)?;
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string()).collect::<Vec<String>>(),
        None => return Ok(Sheet::default()),
    };
    let rows = rows.map(|row| row.iter().map(cell_to_value).collect()).collect();
    Ok(Sheet { headers, rows })
}

fn cell_to_value(cell: &Data) -> LedgerValue {
    match cell {
        Data::Empty => LedgerValue::Empty,
        Data::String(s) => LedgerValue::Text(s.clone()),
        Data::Float(f) => LedgerValue::Number(*f),
        Data::Int(i) => LedgerValue::from(*i),
        other => LedgerValue::Text(other.to_string()),
    }
}

/// Writes the whole sheet to a uniquely named sibling temporary file and moves it over `path`.
fn write_sheet(path: &Path, sheet_name: &str, sheet: &Sheet) -> Result<(), LedgerError> {
    let write_err = |e: rust_xlsxwriter::XlsxError| LedgerError::WriteError(path.display().to_string(), e.to_string());
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(write_err)?;
    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string(0, column_index(col)?, header).map_err(write_err)?;
    }
    for (i, row) in sheet.rows.iter().enumerate() {
        let row_num = u32::try_from(i + 1)
            .map_err(|_| LedgerError::WriteError(path.display().to_string(), "Too many rows".into()))?;
        for (col, value) in row.iter().enumerate() {
            let col = column_index(col)?;
            match value {
                LedgerValue::Text(s) => worksheet.write_string(row_num, col, s).map(|_| ()),
                LedgerValue::Number(n) => worksheet.write_number(row_num, col, *n).map(|_| ()),
                LedgerValue::Empty => Ok(()),
            }
            .map_err(write_err)?;
        }
    }
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(|e| LedgerError::IoError(e.to_string()))?;
    let tmp = tempfile::Builder::new()
        .prefix(".ledger")
        .suffix(".xlsx.tmp")
        .tempfile_in(dir)
        .map_err(|e| LedgerError::IoError(format!("Could not create a temporary file in {}. {e}", dir.display())))?;
    workbook.save(tmp.path()).map_err(write_err)?;
    tmp.persist(path)
        .map_err(|e| LedgerError::IoError(format!("Could not replace {}. {}", path.display(), e.error)))?;
    Ok(())
}

fn column_index(col: usize) -> Result<u16, LedgerError> {
    u16::try_from(col).map_err(|_| LedgerError::WriteError("ledger".into(), format!("Column {col} out of range")))
}
