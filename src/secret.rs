//! Password handling with zeroize-on-drop guarantees.

use secrecy::{ExposeSecret, SecretBox};

/// A password held in memory only as long as needed, zeroized on drop.
pub struct Password {
    inner: SecretBox<str>,
}

impl Password {
    pub fn new(raw: String) -> Self {
        Self { inner: SecretBox::new(raw.into_boxed_str()) }
    }

    pub fn expose_secret(&self) -> &str {
        self.inner.expose_secret()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.expose_secret().as_bytes()
    }
}

impl From<String> for Password {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
