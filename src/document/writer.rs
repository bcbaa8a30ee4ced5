use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

use super::client_sheet;
use crate::models::ClientRecord;

/// Writes rendered documents to an output directory as SVG, converting to
/// PDF when `rsvg-convert` is available.
pub struct DocumentWriter {
    output_dir: PathBuf,
}

impl DocumentWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let path = output_dir.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("creating output directory {}", path.display()))?;
        }

        Ok(Self {
            output_dir: path.to_path_buf(),
        })
    }

    /// Render the client sheet. Returns the SVG path and, if conversion
    /// worked, the PDF path.
    pub fn write_client_sheet(&self, record: &ClientRecord) -> Result<(PathBuf, Option<PathBuf>)> {
        let stem = match record.id {
            Some(id) => format!("client_{id}"),
            None => "client_unsaved".to_string(),
        };
        let svg_path = self.output_dir.join(format!("{stem}.svg"));
        let pdf_path = self.output_dir.join(format!("{stem}.pdf"));

        let mut file = File::create(&svg_path)
            .with_context(|| format!("creating {}", svg_path.display()))?;
        file.write_all(client_sheet(record).to_svg().as_bytes())?;
        info!("wrote {}", svg_path.display());

        let converted = Command::new("rsvg-convert")
            .arg("--format=pdf")
            .arg("--output")
            .arg(&pdf_path)
            .arg(&svg_path)
            .output();

        let pdf = match converted {
            Ok(output) if output.status.success() => {
                info!("wrote {}", pdf_path.display());
                Some(pdf_path)
            }
            Ok(output) => {
                warn!(
                    "failed to convert {} to PDF: {}",
                    svg_path.display(),
                    String::from_utf8_lossy(&output.stderr)
                );
                None
            }
            Err(e) => {
                warn!("could not run rsvg-convert: {}", e);
                None
            }
        };

        Ok((svg_path, pdf))
    }
}
