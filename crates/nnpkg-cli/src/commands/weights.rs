use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use nnpkg_format::WeightFile;

pub struct WeightsArgs {
    pub weights_path: PathBuf,
    pub bytes: bool,
}

/// Blob bytes shown per record with `--bytes`.
const PREVIEW_LEN: usize = 16;

pub fn run(args: WeightsArgs) {
    let bytes = match fs::read(&args.weights_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!(
                "error: failed to read '{}': {}",
                args.weights_path.display(),
                e
            );
            std::process::exit(1);
        }
    };
    match render(&bytes, args.bytes) {
        Ok(listing) => print!("{}", listing),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

/// One header line, then one line per record:
/// `@<metadata offset> <type> <size> bytes at <blob offset>`.
pub fn render(bytes: &[u8], show_bytes: bool) -> Result<String, String> {
    let file = WeightFile::parse(bytes).map_err(|e| e.to_string())?;
    let entries = file.entries().map_err(|e| e.to_string())?;

    let mut out = String::new();
    let header = file.header();
    writeln!(
        out,
        "weights v{}: {} constants, {} blobs, {} bytes",
        header.version,
        header.count,
        entries.len(),
        bytes.len()
    )
    .unwrap();

    for entry in &entries {
        write!(
            out,
            "@{} {} {} bytes at {}",
            entry.metadata_offset,
            entry.data_type.name(),
            entry.bytes.len(),
            entry.blob_offset
        )
        .unwrap();
        if show_bytes {
            let preview = &entry.bytes[..entry.bytes.len().min(PREVIEW_LEN)];
            let hex = hex::encode(preview);
            let pairs: Vec<&str> = (0..hex.len()).step_by(2).map(|i| &hex[i..i + 2]).collect();
            write!(out, " [{}", pairs.join(" ")).unwrap();
            if entry.bytes.len() > PREVIEW_LEN {
                out.push_str(" ..");
            }
            out.push(']');
        }
        out.push('\n');
    }
    Ok(out)
}
