//! Extraction of dataset files from gzipped tarballs.

use std::{
    ffi::OsStr,
    io::{self, Read},
};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::errors::CitationError;

/// Returns the contents of each member named in `wanted`, in order.
///
/// Members are matched by file name so the archive's top-level directory
/// does not matter.
pub(crate) fn extract_members<const N: usize>(
    url: &str,
    bytes: &[u8],
    wanted: [&str; N],
) -> Result<[Vec<u8>; N], CitationError> {
    let corrupt = |error: io::Error| CitationError::Archive {
        url: url.to_owned(),
        message: error.to_string(),
    };

    let mut found: [Option<Vec<u8>>; N] = std::array::from_fn(|_| None);
    let mut archive = Archive::new(GzDecoder::new(bytes));
    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        let slot = {
            let path = entry.path().map_err(corrupt)?;
            path.file_name()
                .and_then(OsStr::to_str)
                .and_then(|name| wanted.iter().position(|member| *member == name))
        };
        let Some(target) = slot.and_then(|index| found.get_mut(index)) else {
            continue;
        };
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).map_err(corrupt)?;
        *target = Some(contents);
    }

    if let Some((_, member)) = found.iter().zip(wanted).find(|(contents, _)| contents.is_none()) {
        return Err(CitationError::MissingMember {
            url: url.to_owned(),
            member: member.to_owned(),
        });
    }
    Ok(found.map(Option::unwrap_or_default))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use flate2::{Compression, write::GzEncoder};
    use tar::{Builder, Header};

    /// Packs `members` as `(path, contents)` into a `.tgz` payload.
    pub(crate) fn tgz(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (path, contents) in members {
            let mut header = Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, *contents)
                .expect("member must be appended");
        }
        let encoder = builder.into_inner().expect("tar stream must finish");
        encoder.finish().expect("gzip stream must finish")
    }
}
