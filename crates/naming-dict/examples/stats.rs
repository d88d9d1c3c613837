use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use naming_dict::{Dictionary, DictionarySources, LoadMode, load_layer};
use naming_types::Tag;

fn main() -> Result<()> {
    let dict_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p naming-dict --example stats -- <dict-dir> [custom.json]")?;
    let mut sources = DictionarySources::in_dir(&dict_dir);
    if let Some(custom) = env::args().nth(2) {
        sources = sources.with_custom(custom);
    }

    // Strict pass first so broken files are reported with their cause.
    for (kind, path) in sources.layers() {
        match load_layer(path, LoadMode::Mmap) {
            Ok(layer) => println!("{:<7} {:>7} words  {}", kind.name(), layer.len(), path.display()),
            Err(err) => println!("{:<7} unavailable ({err:#})", kind.name()),
        }
    }

    let dict = Dictionary::load(&sources, LoadMode::Mmap);
    println!("\nDictionary: {}", dict_dir.display());
    println!("Merged words: {}", dict.len());
    for tag in Tag::ALL {
        println!("  {:<18} {}", tag.to_string(), dict.tag_count(tag));
    }

    for word in ["get", "name", "list", "selected"] {
        let tags: Vec<String> = dict
            .tags(word)
            .map(|tags| tags.iter().map(|t| t.to_string()).collect())
            .unwrap_or_default();
        println!("Word '{}': {:?}", word, tags);
    }

    Ok(())
}
