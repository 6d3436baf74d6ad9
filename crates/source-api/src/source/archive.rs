use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use flate2::read::GzDecoder;
use zip::ZipArchive;

use super::{Source, SourceEntry};
use crate::error::SourceError;
use crate::types::{Artifact, Location};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZIP_MAGIC: [u8; 2] = *b"PK";

/// A jar (zip) or tar bundle, indexed into memory when opened.
///
/// The format is sniffed from the leading bytes, never from the extension:
/// zip archives are read as jars, gzip streams as compressed tar, anything
/// else as plain tar.
#[derive(Debug, Clone)]
pub struct ArchiveSource {
    entry: SourceEntry,
    entries: HashMap<String, Arc<[u8]>>,
}

impl ArchiveSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|err| SourceError::io(path, err))?;

        let indexed = if raw.starts_with(&ZIP_MAGIC) {
            index_zip(&raw)
        } else if raw.starts_with(&GZIP_MAGIC) {
            index_tar(GzDecoder::new(raw.as_slice()))
        } else {
            index_tar(raw.as_slice())
        };
        let entries = indexed.map_err(|source| SourceError::Archive {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            entry: SourceEntry::Archive(path.to_path_buf()),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        self.entry.path()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Source for ArchiveSource {
    fn describe(&self) -> String {
        format!("archive {}", self.path().display())
    }

    fn entry(&self) -> Option<&SourceEntry> {
        Some(&self.entry)
    }

    fn find(&self, path: &str) -> Result<Option<Artifact>, SourceError> {
        Ok(self.entries.get(path).map(|bytes| {
            Artifact::new(
                path,
                Arc::clone(bytes),
                Location::Archive {
                    archive: self.path().to_path_buf(),
                    entry: path.to_string(),
                },
            )
        }))
    }
}

fn index_tar<R: Read>(reader: R) -> io::Result<HashMap<String, Arc<[u8]>>> {
    let mut archive = tar::Archive::new(reader);
    let mut index = HashMap::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let Some(name) = entry_name(&entry.path()?) else {
            continue;
        };
        // The header size is untrusted; grow the buffer from what is actually read.
        let declared = entry.size();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        if bytes.len() as u64 != declared {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("entry '{name}' declares {declared} bytes but holds {}", bytes.len()),
            ));
        }
        index.insert(name, Arc::from(bytes));
    }

    Ok(index)
}

fn index_zip(raw: &[u8]) -> io::Result<HashMap<String, Arc<[u8]>>> {
    let mut archive = ZipArchive::new(Cursor::new(raw)).map_err(io::Error::other)?;
    let mut index = HashMap::new();

    for position in 0..archive.len() {
        let mut file = archive.by_index(position).map_err(io::Error::other)?;
        if !file.is_file() {
            continue;
        }
        let Some(name) = file.enclosed_name() else {
            continue;
        };
        let Some(name) = entry_name(Path::new(&name)) else {
            continue;
        };
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        index.insert(name, Arc::from(bytes));
    }

    Ok(index)
}

/// Flatten an entry path to `a/b/c`, dropping `./` and refusing anything that climbs.
fn entry_name(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn tar_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, body) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_entry_type(tar::EntryType::Regular);
            header.set_cksum();
            builder.append_data(&mut header, name, *body).unwrap();
        }
        builder.into_inner().unwrap()
    }

    #[test]
    fn indexes_plain_tar_regardless_of_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("helpers.jar");
        fs::write(
            &path,
            tar_bytes(&[("util/Helper.class", b"helper"), ("./util/Other.class", b"other")]),
        )
        .unwrap();

        let source = ArchiveSource::open(&path).unwrap();
        assert_eq!(source.len(), 2);

        let other = source.find("util/Other.class").unwrap().unwrap();
        assert_eq!(other.bytes(), b"other");
        assert_eq!(
            other.location(),
            &Location::Archive {
                archive: path.clone(),
                entry: "util/Other.class".into()
            }
        );
        assert!(source.find("util/Missing.class").unwrap().is_none());
    }

    #[test]
    fn indexes_gzip_compressed_tar() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bundle.tgz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&tar_bytes(&[("config/app.toml", b"name = 'x'")]))
            .unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let source = ArchiveSource::open(&path).unwrap();
        let artifact = source.find("config/app.toml").unwrap().unwrap();
        assert_eq!(artifact.bytes(), b"name = 'x'");
    }

    #[test]
    fn garbage_is_reported_as_archive_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.tar");
        fs::write(&path, vec![0x42; 1024]).unwrap();

        let err = ArchiveSource::open(&path).unwrap_err();
        assert!(matches!(err, SourceError::Archive { .. }));
    }

    fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .add_directory("util/", SimpleFileOptions::default())
            .unwrap();
        for (name, body) in files {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn indexes_zip_jars() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("helpers.jar");
        fs::write(
            &path,
            zip_bytes(&[
                ("util/Helper.class", b"helper"),
                ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0"),
            ]),
        )
        .unwrap();

        let source = ArchiveSource::open(&path).unwrap();
        assert_eq!(source.len(), 2);

        let helper = source.find("util/Helper.class").unwrap().unwrap();
        assert_eq!(helper.bytes(), b"helper");
        assert_eq!(
            helper.location(),
            &Location::Archive {
                archive: path.clone(),
                entry: "util/Helper.class".into()
            }
        );
        assert!(source.find("util/").unwrap().is_none());
    }

    #[test]
    fn truncated_zip_is_reported_as_archive_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jar");
        let mut bytes = zip_bytes(&[("util/Helper.class", b"helper")]);
        bytes.truncate(bytes.len() / 2);
        fs::write(&path, bytes).unwrap();

        let err = ArchiveSource::open(&path).unwrap_err();
        assert!(matches!(err, SourceError::Archive { .. }));
    }

    #[test]
    fn oversized_entry_headers_are_rejected() {
        let mut header = tar::Header::new_gnu();
        header.set_path("util/Helper.class").unwrap();
        header.set_size(u64::MAX / 2);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        let mut raw = header.as_bytes().to_vec();
        raw.extend_from_slice(&[0u8; 1024]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.tar");
        fs::write(&path, raw).unwrap();

        let err = ArchiveSource::open(&path).unwrap_err();
        assert!(matches!(err, SourceError::Archive { .. }));
    }

    #[test]
    fn entry_names_are_flattened() {
        assert_eq!(entry_name(Path::new("./a/b.txt")).as_deref(), Some("a/b.txt"));
        assert_eq!(entry_name(Path::new("../a.txt")), None);
        assert_eq!(entry_name(Path::new(".")), None);
    }
}
