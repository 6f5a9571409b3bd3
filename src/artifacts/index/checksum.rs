use crate::artifacts::index::CHECKSUM_PREFIX;
use crate::error::TwigError;
use sha1::{Digest, Sha1};
use std::io::Write;

/// Writer that digests everything passing through it and can append the
/// digest as the trailing checksum line
#[derive(Debug)]
pub struct Checksum<W: Write> {
    inner: W,
    digest: Sha1,
}

impl<W: Write> Checksum<W> {
    pub fn new(inner: W) -> Self {
        Checksum {
            inner,
            digest: Sha1::new(),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.inner.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(mut self) -> anyhow::Result<W> {
        let checksum = format!("{:x}", self.digest.clone().finalize());
        self.inner
            .write_all(format!("{CHECKSUM_PREFIX}{checksum}\n").as_bytes())?;
        self.inner.flush()?;

        Ok(self.inner)
    }
}

/// Check the trailing checksum line and return the content it covers
pub fn verify(content: &str) -> anyhow::Result<&str> {
    let trimmed = content.strip_suffix('\n').unwrap_or(content);
    let split_at = trimmed.rfind('\n').map(|pos| pos + 1).unwrap_or(0);
    let (body, checksum_line) = content.split_at(split_at);

    let expected = checksum_line
        .trim_end()
        .strip_prefix(CHECKSUM_PREFIX)
        .ok_or_else(|| TwigError::MalformedIndex("missing checksum".to_string()))?;

    let actual = format!("{:x}", Sha1::digest(body.as_bytes()));
    if expected != actual {
        return Err(TwigError::MalformedIndex(
            "checksum does not match value stored on disk".to_string(),
        )
        .into());
    }

    Ok(body)
}
