use std::borrow::Cow;

/// A set of named resources compiled into the binary, usually declared with
/// [`embed_resources!`](crate::embed_resources).
///
/// Resources are looked up by a suffix of their name, so callers don't need to know the full
/// name a resource was embedded under.
///
/// # Matching
/// Every name ending with the suffix, ignoring case, is a candidate. The candidates are sorted
/// and the first one ending with the suffix exactly is picked, or the first candidate if none of
/// them do. A blank suffix never matches.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResources {
    entries: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedResources {
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> EmbeddedResources {
        EmbeddedResources { entries }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Returns the full name of the resource matching `suffix`.
    pub fn name_by_suffix(&self, suffix: &str) -> Option<&'static str> {
        if suffix.trim().is_empty() {
            return None;
        }

        let lower_suffix = suffix.to_lowercase();
        let mut candidates: Vec<&'static str> = self
            .names()
            .filter(|name| name.to_lowercase().ends_with(&lower_suffix))
            .collect();
        candidates.sort_unstable();

        candidates
            .iter()
            .find(|name| name.ends_with(suffix))
            .or_else(|| candidates.first())
            .copied()
    }

    /// Returns the contents of the resource matching `suffix`.
    pub fn bytes_by_suffix(&self, suffix: &str) -> Option<&'static [u8]> {
        let name = self.name_by_suffix(suffix)?;
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, bytes)| *bytes)
    }

    /// Returns the contents of the resource matching `suffix` as UTF-8 text. A byte order mark is
    /// skipped and invalid sequences are replaced.
    pub fn text_by_suffix(&self, suffix: &str) -> Option<Cow<'static, str>> {
        let bytes = self.bytes_by_suffix(suffix)?;
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        Some(String::from_utf8_lossy(bytes))
    }
}

/// Declares an [`EmbeddedResources`](crate::ext::EmbeddedResources) from pairs of names and file
/// paths, which are included with [`include_bytes!`].
///
/// ```ignore
/// static RESOURCES: EmbeddedResources = ease_util::embed_resources! {
///     "app/config/defaults.toml" => "../config/defaults.toml",
///     "app/templates/welcome.txt" => "../templates/welcome.txt",
/// };
///
/// let defaults = RESOURCES.text_by_suffix("defaults.toml");
/// ```
#[macro_export]
macro_rules! embed_resources {
    ($($name:expr => $path:expr),* $(,)?) => {
        $crate::ext::EmbeddedResources::new(&[$(($name, include_bytes!($path) as &[u8])),*])
    };
}
