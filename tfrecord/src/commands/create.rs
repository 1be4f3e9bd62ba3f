use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};

use tfrecord_format::RecordWriter;

use crate::cli::CreateArgs;
use crate::error::{Error, Result};

pub fn run(args: CreateArgs) -> Result<()> {
    if let Some(path) = args.inputs.iter().find(|p| **p == args.file) {
        return Err(Error::SelfReference { path: path.clone() });
    }
    if args.file.exists() && !args.force {
        return Err(Error::OutputExists { path: args.file });
    }

    let file = File::create(&args.file).map_err(|source| Error::CreateFile {
        path: args.file.clone(),
        source,
    })?;
    let mut writer = RecordWriter::new(BufWriter::new(file));
    let write_err = |source| Error::WriteRecords {
        path: args.file.clone(),
        source,
    };

    let mut count = 0u64;
    for input in &args.inputs {
        let open_err = |source| Error::OpenFile {
            path: input.clone(),
            source,
        };
        let read_err = |source| Error::ReadFile {
            path: input.clone(),
            source,
        };

        if args.lines {
            let reader = BufReader::new(File::open(input).map_err(open_err)?);
            for line in reader.split(b'\n') {
                let mut line = line.map_err(read_err)?;
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                writer.write_record(&line).map_err(write_err)?;
                count += 1;
            }
        } else {
            let data = std::fs::read(input).map_err(read_err)?;
            writer.write_record(&data).map_err(write_err)?;
            count += 1;
        }
        tracing::info!(input = %input.display(), "added");
    }
    writer.flush().map_err(write_err)?;

    tracing::debug!(records = count, path = %args.file.display(), "created");
    Ok(())
}
