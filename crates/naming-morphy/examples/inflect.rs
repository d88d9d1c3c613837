use std::env;

use anyhow::{Result, bail};
use naming_morphy::{Number, Pluralizer};

fn main() -> Result<()> {
    let mut args = env::args().skip(1).peekable();
    let exceptions = args
        .peek()
        .and_then(|a| a.strip_prefix("--exceptions="))
        .map(str::to_string);
    let pluralizer = match exceptions {
        Some(path) => {
            args.next();
            Pluralizer::load(&path)?
        }
        None => Pluralizer::new(),
    };

    let words: Vec<String> = match args.next() {
        Some(arg) if arg == "--demo" => vec![
            "children".into(),
            "items".into(),
            "data".into(),
            "status".into(),
            "leaves".into(),
            "news".into(),
        ],
        Some(arg) => std::iter::once(arg).chain(args).collect(),
        None => bail!(
            "usage: cargo run -p naming-morphy --example inflect -- [--exceptions=<file>] [--demo | <word>...]"
        ),
    };

    println!("Irregular pairs: {}", pluralizer.irregular_count());
    for word in words {
        println!("\nWord: {}", word);
        println!(
            "  plural? {:<5} singular? {}",
            pluralizer.is_plural(&word),
            pluralizer.is_singular(&word)
        );
        for number in [Number::Singular, Number::Plural] {
            let inflection = pluralizer.inflect(&word, number);
            println!(
                "  {:?}: {:<12} [{:?}]",
                number, inflection.form, inflection.source
            );
        }
    }

    Ok(())
}
