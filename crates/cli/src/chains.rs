use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};
use tradewire_sdk::{ChainDescriptor, ChainRegistry};

#[derive(Tabled)]
struct ChainRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Chain ID")]
    chain_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "RPC")]
    rpc: String,
    #[tabled(rename = "Explorer")]
    explorer: String,
}

impl ChainRow {
    fn new(key: &str, chain: &ChainDescriptor) -> Self {
        Self {
            key: key.to_string(),
            chain_id: format!("{} ({})", chain.chain_id(), chain.chain_id_hex()),
            name: chain.chain_name().to_string(),
            currency: format!(
                "{} ({} decimals)",
                chain.native_currency().symbol,
                chain.native_currency().decimals
            ),
            rpc: chain.rpc_urls().join("\n"),
            explorer: chain.block_explorer_urls().join("\n"),
        }
    }
}

pub(crate) fn render(registry: &ChainRegistry) -> anyhow::Result<()> {
    let mut rows: Vec<_> = registry
        .iter()
        .map(|(key, chain)| ChainRow::new(key, chain))
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    println!("{}", format!("{} known chain(s)", registry.len()).bold());
    println!("{}", Table::new(rows).with(Style::sharp()));
    Ok(())
}
