//! Load and merge layered part-of-speech dictionaries.
//!
//! A dictionary file is a JSON object mapping each word to its tag flags:
//!
//! ```json
//! { "understand": { "v": true, "vb": true }, "pineapple": { "n": true } }
//! ```
//!
//! Three layers are merged in fixed precedence: the base vocabulary
//! (`dictionary.json`), coding terms (`coding_word_dictionary.json`), and an
//! optional user file (`reviewCustomDict.json`). A later layer only touches the
//! tags it names for the words it lists: `true` adds a tag, `false` removes
//! it, everything else is inherited. The merged [`Dictionary`] is frozen;
//! there is no API to mutate it after construction.
//!
//! Loading a layer for a review run never fails: unreadable or malformed files
//! are logged and treated as empty, which only makes the review more
//! permissive. [`load_layer`] is the strict variant for tooling.
//!
//! # Example
//! ```no_run
//! use naming_dict::{Dictionary, DictionarySources, LoadMode};
//! use naming_types::Tag;
//!
//! let sources = DictionarySources::in_dir("/path/to/dict").with_custom("reviewCustomDict.json");
//! let dict = Dictionary::load(&sources, LoadMode::Mmap);
//! println!("{} words", dict.len());
//! println!("'get' is a verb? {:?}", dict.has_tag("get", Tag::Verb));
//! ```
//!
//! For a runnable demo, see `cargo run -p naming-dict --example stats -- <dict-dir>`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;
use naming_types::{Tag, TagSet};
use tracing::{debug, info, warn};

pub const BASE_DICTIONARY_FILE: &str = "dictionary.json";
pub const DOMAIN_DICTIONARY_FILE: &str = "coding_word_dictionary.json";
pub const CUSTOM_DICTIONARY_FILE: &str = "reviewCustomDict.json";

/// Strategy for reading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each file (fast, zero-copy parse input).
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// One dictionary source as stored on disk: word -> tag code -> flag.
pub type RawLayer = HashMap<String, HashMap<String, bool>>;

/// Dictionary layers in increasing precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Base,
    Domain,
    Custom,
}

impl LayerKind {
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Base => "base",
            LayerKind::Domain => "domain",
            LayerKind::Custom => "custom",
        }
    }
}

/// Where each dictionary layer lives on disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DictionarySources {
    pub base: PathBuf,
    pub domain: PathBuf,
    pub custom: Option<PathBuf>,
}

impl DictionarySources {
    /// Base and domain files inside `dir`, no custom layer.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            base: dir.join(BASE_DICTIONARY_FILE),
            domain: dir.join(DOMAIN_DICTIONARY_FILE),
            custom: None,
        }
    }

    pub fn with_custom(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom = Some(path.into());
        self
    }

    /// Layers in merge order.
    pub fn layers(&self) -> Vec<(LayerKind, &Path)> {
        let mut layers = vec![
            (LayerKind::Base, self.base.as_path()),
            (LayerKind::Domain, self.domain.as_path()),
        ];
        if let Some(custom) = &self.custom {
            layers.push((LayerKind::Custom, custom.as_path()));
        }
        layers
    }
}

/// Merged word -> tag set mapping, immutable once built.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: HashMap<String, TagSet>,
}

impl Dictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge raw layers given in increasing precedence.
    pub fn from_layers<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = RawLayer>,
    {
        let mut entries = HashMap::new();
        for layer in layers {
            merge_layer(&mut entries, layer);
        }
        Self { entries }
    }

    /// Load every layer named by `sources` and merge them.
    ///
    /// Layers that cannot be read or parsed contribute nothing; the failure is
    /// logged and the run continues.
    pub fn load(sources: &DictionarySources, mode: LoadMode) -> Self {
        let mut entries = HashMap::new();
        for (kind, path) in sources.layers() {
            let layer = load_layer_or_empty(path, mode);
            info!(
                "{} dictionary layer: {} words from {}",
                kind.name(),
                layer.len(),
                path.display()
            );
            merge_layer(&mut entries, layer);
        }
        let dict = Self { entries };
        info!("dictionary ready with {} words", dict.len());
        dict
    }

    /// Tags recorded for `word`, or `None` if the word is unknown.
    pub fn tags(&self, word: &str) -> Option<TagSet> {
        self.entries.get(&normalize_word(word)).copied()
    }

    /// Whether `word` carries `tag`; `None` if the word is unknown.
    pub fn has_tag(&self, word: &str, tag: Tag) -> Option<bool> {
        self.tags(word).map(|tags| tags.contains(tag))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&normalize_word(word))
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of words carrying `tag`.
    pub fn tag_count(&self, tag: Tag) -> usize {
        self.entries.values().filter(|tags| tags.contains(tag)).count()
    }

    /// Iterate over all words and their tags, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = (&str, TagSet)> + '_ {
        self.entries.iter().map(|(word, tags)| (word.as_str(), *tags))
    }
}

fn merge_layer(entries: &mut HashMap<String, TagSet>, layer: RawLayer) {
    for (word, flags) in layer {
        let tags = entries.entry(normalize_word(&word)).or_default();
        for (code, value) in flags {
            match Tag::from_code(&code) {
                Some(tag) if value => tags.insert(tag),
                Some(tag) => tags.remove(tag),
                None => debug!("ignoring unknown tag code '{code}' for '{word}'"),
            }
        }
    }
}

/// Read and parse one dictionary layer, failing on any I/O or JSON error.
pub fn load_layer(path: impl AsRef<Path>, mode: LoadMode) -> Result<RawLayer> {
    let path = path.as_ref();
    let buffer = load_file(path, mode)?;
    serde_json::from_slice(buffer.as_slice()).with_context(|| format!("parse {}", path.display()))
}

/// Read one dictionary layer, logging and returning an empty layer on failure.
pub fn load_layer_or_empty(path: impl AsRef<Path>, mode: LoadMode) -> RawLayer {
    let path = path.as_ref();
    match load_layer(path, mode) {
        Ok(layer) => layer,
        Err(err) => {
            warn!("dictionary {} unavailable: {err:#}", path.display());
            RawLayer::new()
        }
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            // Mapping a zero-length file is not portable.
            if file.metadata().map(|m| m.len() == 0).unwrap_or(false) {
                return Ok(Buffer::Owned(Vec::new()));
            }
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn normalize_word(text: &str) -> String {
    let mut s = text.trim().to_string();
    s.make_ascii_lowercase();
    s
}
