//! Reading sources and writing formatted output
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Reads every file in `paths`. Directories are read one level deep, taking only `.svg` files.
///
/// # Errors
/// If any path cannot be read
pub fn load_files(paths: &[PathBuf]) -> anyhow::Result<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    for path in paths {
        load_file(path, &mut files)?;
    }
    Ok(files)
}

fn load_file(path: &Path, files: &mut Vec<(PathBuf, String)>) -> anyhow::Result<()> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("Cannot read {}", path.display()))?;
    if metadata.is_file() {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        files.push((path.to_path_buf(), source));
        return Ok(());
    }

    let mut entries = std::fs::read_dir(path)
        .with_context(|| format!("Cannot read directory {}", path.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    for entry in entries {
        if entry.is_file() && entry.extension().is_some_and(|ext| ext == "svg") {
            let source = std::fs::read_to_string(&entry)
                .with_context(|| format!("Cannot read {}", entry.display()))?;
            files.push((entry, source));
        } else {
            log::debug!("skipping {}", entry.display());
        }
    }
    Ok(())
}

/// Writes `contents` formatted from `source`.
///
/// Without an `output` the contents are printed to stdout. When `output` is an existing
/// directory the file is written into it with the name of `source`, otherwise `output` is
/// written as a file.
///
/// # Errors
/// If the output cannot be written
pub fn write_file(output: Option<&Path>, source: &Path, contents: &str) -> anyhow::Result<()> {
    let Some(output) = output else {
        println!("{contents}");
        return Ok(());
    };

    let path = if output.is_dir() {
        let file_name = source
            .file_name()
            .with_context(|| format!("{} has no file name", source.display()))?;
        output.join(file_name)
    } else {
        if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory {}", parent.display()))?;
        }
        output.to_path_buf()
    };
    log::debug!("writing {}", path.display());
    std::fs::write(&path, contents).with_context(|| format!("Cannot write {}", path.display()))
}

#[test]
fn load_and_write() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("svgtree-fs-{}", std::process::id()));
    let input = dir.join("input");
    let output = dir.join("output");
    std::fs::create_dir_all(&input)?;
    std::fs::create_dir_all(&output)?;
    std::fs::write(input.join("b.svg"), "<svg/>")?;
    std::fs::write(input.join("a.svg"), "<svg><g/></svg>")?;
    std::fs::write(input.join("notes.txt"), "not an svg")?;

    let files = load_files(&[input.clone()])?;
    let names: Vec<_> = files
        .iter()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.svg", "b.svg"]);
    assert_eq!(files[0].1, "<svg><g/></svg>");

    write_file(Some(output.as_path()), &files[1].0, "<svg/>")?;
    assert_eq!(std::fs::read_to_string(output.join("b.svg"))?, "<svg/>");
    let nested = output.join("nested").join("c.svg");
    write_file(Some(nested.as_path()), &files[0].0, "<svg>\n    <g/>\n</svg>")?;
    assert_eq!(std::fs::read_to_string(&nested)?, "<svg>\n    <g/>\n</svg>");

    assert!(load_files(&[dir.join("missing.svg")]).is_err());
    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
