use std::io;
use std::path::PathBuf;
use include_dir::{include_dir, Dir};
use uuid::Uuid;

static STATIC_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Unpacks the bundled front page into a fresh temp directory so it can be
/// served with `NamedFile`.
pub fn extract_static_assets() -> io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("roster_static_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir)?;
    STATIC_DIR.extract(&dir)?;
    Ok(dir)
}
