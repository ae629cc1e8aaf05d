use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bytes::Bytes;

use crate::cli::Config;
use crate::pattern::Pattern;

/// Read a whole input into a shared buffer.
pub fn read_input<R: Read>(mut reader: R) -> io::Result<Bytes> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(Bytes::from(buf))
}

/// Split `buf` into lines without copying. A trailing `\r` is dropped and
/// empty lines are skipped.
pub fn lines(buf: &Bytes) -> impl Iterator<Item = Bytes> + '_ {
    let mut start = 0;
    std::iter::from_fn(move || {
        while start < buf.len() {
            let end = buf[start..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(buf.len(), |i| start + i);
            let mut line = buf.slice(start..end);
            start = end + 1;
            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }
            if !line.is_empty() {
                return Some(line);
            }
        }
        None
    })
}

/// Collect the files under `path`: the path itself when it is a file, its
/// whole tree in sorted order when it is a directory and `recursive` is set.
///
/// A symlink named on the command line is followed; symlinks met while
/// walking a directory are skipped.
pub fn collect_files(path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let metadata =
        fs::metadata(path).with_context(|| format!("{}: cannot access", path.display()))?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !recursive {
        bail!("{}: Is a directory", path.display());
    }
    let mut files = Vec::new();
    walk_dir(path, &mut files)?;
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("{}: cannot read directory", dir.display()))?
        .map(|entry| entry.and_then(|entry| Ok((entry.path(), entry.file_type()?))))
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("{}: cannot read directory", dir.display()))?;
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (path, file_type) in entries {
        if file_type.is_dir() {
            walk_dir(&path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/// Runs a compiled pattern over inputs and writes the matching lines.
pub struct Searcher {
    pattern: Pattern,
}

impl Searcher {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    /// Write every matching line of `buf`, prefixed with `label:` when given.
    /// Returns whether any line matched.
    pub fn search_buffer<W: Write>(
        &self,
        buf: &Bytes,
        label: Option<&str>,
        out: &mut W,
    ) -> io::Result<bool> {
        let mut matched = false;
        for line in lines(buf) {
            if !self.pattern.is_match(&String::from_utf8_lossy(&line)) {
                continue;
            }
            matched = true;
            if let Some(label) = label {
                out.write_all(label.as_bytes())?;
                out.write_all(b":")?;
            }
            out.write_all(&line)?;
            out.write_all(b"\n")?;
        }
        Ok(matched)
    }

    /// Search the inputs named by `config`, or `stdin` when it names none.
    pub fn run<R: Read, W: Write>(&self, config: &Config, stdin: R, out: &mut W) -> Result<bool> {
        if config.paths.is_empty() {
            let buf = read_input(stdin).context("cannot read standard input")?;
            return Ok(self.search_buffer(&buf, None, out)?);
        }
        let prefix = config.prefix_file_names();
        let mut matched = false;
        for path in &config.paths {
            for file in collect_files(path, config.recursive)? {
                let buf = fs::read(&file)
                    .map(Bytes::from)
                    .with_context(|| format!("{}: cannot read file", file.display()))?;
                let label = file.display().to_string();
                let label = prefix.then_some(label.as_str());
                matched |= self.search_buffer(&buf, label, out)?;
            }
        }
        Ok(matched)
    }
}
