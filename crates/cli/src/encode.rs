use std::{io::Read, path::Path};

use anyhow::Context;
use colored::Colorize;
use tradewire_sdk::{encoder, types::Order};

pub(crate) fn run(order_path: &Path) -> anyhow::Result<()> {
    let order = load_order(order_path)?;
    let fields = encoder::encode(&order)?;
    let digest = encoder::hash(&fields)?;

    println!("{}", "Signing fields".bold());
    for (index, field) in fields.iter().enumerate() {
        println!("{:>4}. {}", index + 1, field);
    }
    println!();
    println!("{} {}", "Digest:".bold(), digest.to_string().green());
    Ok(())
}

pub(crate) fn load_order(path: &Path) -> anyhow::Result<Order> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading order from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading order {}", path.display()))?
    };
    Ok(Order::from_json(&text)?)
}
