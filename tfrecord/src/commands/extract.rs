use std::path::PathBuf;

use super::{finish, open_reader};
use crate::cli::ExtractArgs;
use crate::error::{Error, Result};

pub fn run(args: ExtractArgs) -> Result<()> {
    let output = args.output.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output).map_err(|source| Error::CreateDirectory {
        path: output.clone(),
        source,
    })?;

    let mut reader = open_reader(&args.file, &args.read)?;
    while reader.advance() {
        let path = output.join(format!("{:08}.bin", reader.records_read() - 1));
        let payload = reader.value().unwrap_or_default();
        std::fs::write(&path, payload).map_err(|source| Error::CreateFile {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = payload.len(), "extracted record");
    }

    finish(&args.file, reader)
}
