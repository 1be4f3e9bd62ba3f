use super::{finish, format_size, open_reader};
use crate::cli::ValidateArgs;
use crate::error::Result;

pub fn run(args: ValidateArgs) -> Result<()> {
    let mut reader = open_reader(&args.file, &args.read)?;

    let mut payload_bytes = 0u64;
    while reader.advance() {
        payload_bytes += reader.value().map_or(0, |v| v.len() as u64);
    }
    let records = reader.records_read();
    finish(&args.file, reader)?;

    if !args.quiet {
        println!(
            "Validated {} records ({} of payload)",
            records,
            format_size(payload_bytes)
        );
    }

    Ok(())
}
