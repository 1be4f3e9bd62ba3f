use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open file `{}`", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read file `{}`", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read records from `{}`", .path.display())]
    ReadRecords {
        path: PathBuf,
        #[source]
        source: tfrecord_format::Error,
    },

    #[error("Cannot create file `{}`", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write records to `{}`", .path.display())]
    WriteRecords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create directory `{}`", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output already exists: `{}`; use -f/--force to overwrite", .path.display())]
    OutputExists { path: PathBuf },

    #[error("Cowardly refusing to read `{}` into itself", .path.display())]
    SelfReference { path: PathBuf },
}
