//! Content signatures for listing lines

use crate::tree::hasher::compute_content_hash;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_SAMPLE_SIZE: u64 = 1024;

/// How a file's signature is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HashMode {
    /// Hash of the whole content
    #[default]
    Full,
    /// Hash of a block from the middle of the file
    Sample,
    /// Hash of the file name and size, no content is read
    NameSize,
}

impl HashMode {
    pub fn as_str(self) -> &'static str {
        match self {
            HashMode::Full => "full",
            HashMode::Sample => "sample",
            HashMode::NameSize => "name-size",
        }
    }

    fn prefix(self) -> char {
        match self {
            HashMode::Full => 'h',
            HashMode::Sample => 's',
            HashMode::NameSize => 'n',
        }
    }
}

impl fmt::Display for HashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(HashMode::Full),
            "sample" => Ok(HashMode::Sample),
            "name-size" => Ok(HashMode::NameSize),
            other => Err(format!(
                "unknown hash mode `{}`, expected full, sample or name-size",
                other
            )),
        }
    }
}

/// Computes signatures in one [`HashMode`]
#[derive(Debug, Clone, Copy)]
pub struct Signer {
    mode: HashMode,
    sample_size: u64,
}

impl Signer {
    pub fn new(mode: HashMode, sample_size: u64) -> Self {
        Self { mode, sample_size }
    }

    pub fn mode(&self) -> HashMode {
        self.mode
    }

    /// Signature of the file at `path`, which is `size` bytes long
    pub fn sign(&self, path: &Path, size: u64) -> io::Result<String> {
        let digest = match self.mode {
            HashMode::Full => {
                let mut hasher = blake3::Hasher::new();
                hasher.update_reader(File::open(path)?)?;
                *hasher.finalize().as_bytes()
            }
            HashMode::Sample => compute_content_hash(&read_sample(path, size, self.sample_size)?),
            HashMode::NameSize => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                compute_content_hash(format!("{}+{}", name, size).as_bytes())
            }
        };
        Ok(format!("{}{}", self.mode.prefix(), hex::encode(digest)))
    }
}

/// Up to `sample_size` bytes centered in the file
fn read_sample(path: &Path, size: u64, sample_size: u64) -> io::Result<Vec<u8>> {
    if size == 0 {
        return Ok(Vec::new());
    }
    let mut file = File::open(path)?;
    let offset = if size > sample_size {
        (size - sample_size) / 2
    } else {
        0
    };
    file.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::with_capacity(sample_size.min(size) as usize);
    file.take(sample_size).read_to_end(&mut buf)?;
    Ok(buf)
}
