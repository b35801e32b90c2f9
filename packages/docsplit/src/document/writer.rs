//! Document writer.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::content::FileContentType;
use crate::element::Element;
use crate::error::Result;

/// Serialize an element (wrapped with its alias) to text.
///
/// JSON is pretty printed. YAML starts with a document start marker. Both
/// end with a newline.
///
/// # Errors
///
/// Returns `Json` / `Yaml` if the value cannot be serialized.
pub fn to_string(element: &Element, content_type: FileContentType) -> Result<String> {
    let wrapper = element.wrap();
    let content = match content_type {
        FileContentType::Json => format!("{}\n", serde_json::to_string_pretty(&wrapper)?),
        FileContentType::Yaml => {
            let yaml = serde_yaml_ng::to_string(&wrapper)?;
            let yaml = yaml.strip_prefix("---\n").unwrap_or(&yaml);
            format!("---\n{}", yaml)
        }
    };
    Ok(content)
}

/// Write an element to `path`.
///
/// Uses atomic write pattern: writes to a temp file next to the target,
/// syncs to disk, then renames over the target.
///
/// # Errors
///
/// Returns serialization errors, or `Io` if the file cannot be written.
pub fn write_element(element: &Element, path: &Path, content_type: FileContentType) -> Result<()> {
    let content = to_string(element, content_type)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;

    tracing::debug!(path = %path.display(), alias = element.alias(), "wrote element");
    Ok(())
}
