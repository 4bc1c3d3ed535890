use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Once,
};

use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::ReportError;

static TRACING_INIT: Once = Once::new();

pub const DEFAULT_LOG_FILTER: &str = "money_report_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_LOG_FILTER);
}

/// Initializes tracing with `directive` layered over `RUST_LOG`. Only the first
/// call in a process installs a subscriber.
pub fn init_tracing_with(directive: &str) {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        match directive.parse() {
            Ok(parsed) => filter = filter.add_directive(parsed),
            Err(err) => eprintln!("ignoring invalid log filter `{directive}`: {err}"),
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

const TMP_SUFFIX: &str = "tmp";

pub fn ensure_dir(path: &Path) -> Result<(), ReportError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes `data` next to `path` and renames it into place.
pub fn write_atomic(path: &Path, data: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
