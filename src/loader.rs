/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * License:
 * This file is part of the Okerew scripting language project.
 *
 * Okerew is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extension every script must carry.
pub const SOURCE_EXTENSION: &str = "okerew";

/// Failure to obtain a script's source text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The file must have a .okerew extension.")]
    WrongExtension(PathBuf),

    #[error("could not read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads a script after checking its extension.
///
/// The extension check happens first, so a missing `notes.txt` is still
/// reported as a wrong extension.
pub fn load_source(path: &Path) -> Result<String, LoadError> {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext == SOURCE_EXTENSION);

    if !has_extension {
        return Err(LoadError::WrongExtension(path.to_path_buf()));
    }

    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = source.len(), "loaded script");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("okerew-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_okerew_files() {
        let path = scratch_file("hello.okerew", "print 'hello'\n");
        assert_eq!(load_source(&path).unwrap(), "print 'hello'\n");
    }

    #[test]
    fn rejects_other_extensions() {
        let path = scratch_file("hello.txt", "print 1");
        let err = load_source(&path).unwrap_err();

        assert!(matches!(err, LoadError::WrongExtension(_)));
        assert_eq!(err.to_string(), "The file must have a .okerew extension.");
    }

    #[test]
    fn rejects_missing_extension() {
        let err = load_source(Path::new("script")).unwrap_err();
        assert!(matches!(err, LoadError::WrongExtension(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_source(Path::new("/definitely/not/here.okerew")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
