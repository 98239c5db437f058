use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::views::ViewBatch;

/// Write `batch` as pretty JSON to `path`, or to stdout when `path` is `-`.
pub fn write_views(batch: &ViewBatch, path: &Path) -> Result<()> {
    if path == Path::new("-") {
        let stdout = io::stdout();
        write_json(batch, stdout.lock()).context("writing views to stdout")?;
    } else {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_json(batch, BufWriter::new(file))
            .with_context(|| format!("writing views to {}", path.display()))?;
        log::info!("Wrote view data to {}", path.display());
    }
    Ok(())
}

fn write_json<W: Write>(batch: &ViewBatch, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, batch)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
