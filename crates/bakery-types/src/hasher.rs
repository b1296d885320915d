use std::io;

use crate::cake::{Cake, CakeKind};

/// Incremental BLAKE3 hasher that yields a [`Cake`].
///
/// The kind is fixed up front and does not take part in the digest: the same
/// bytes hashed as a blob and as a folder share a digest and differ only in
/// their tag.
#[derive(Clone, Debug)]
pub struct CakeHasher {
    kind: CakeKind,
    inner: blake3::Hasher,
}

impl CakeHasher {
    pub fn new(kind: CakeKind) -> Self {
        Self {
            kind,
            inner: blake3::Hasher::new(),
        }
    }

    /// Feed more bytes into the hasher.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Produce the cake for everything written so far.
    pub fn finalize(&self) -> Cake {
        Cake::from_digest(*self.inner.finalize().as_bytes(), self.kind)
    }

    pub fn kind(&self) -> CakeKind {
        self.kind
    }
}

impl io::Write for CakeHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
