use std::io::Read;

use clap::Parser;

use crate::builder::{self, Options};
use crate::error::SolrQueryError;
use crate::json;

/// Build a Solr/Lucene query string from a JSON conditions document.
#[derive(Parser, Debug)]
#[command(name = "solrq", version, about)]
pub struct Cli {
    /// JSON object of field conditions, or `-` to read it from stdin
    pub conditions: String,

    /// Condition field treated as the magical free-text keyword
    #[arg(long, default_value = "keyword")]
    pub keyword_key: String,

    /// Extra field to search so exact keyword matches raise relevance
    #[arg(long)]
    pub keyword_boost: Option<String>,

    /// Term-distance window for keyword proximity phrase search
    #[arg(long, default_value_t = 1000)]
    pub keyword_proximity: u32,

    /// Emit a JSON object instead of the bare query string
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
struct QueryOutput {
    query: String,
}

pub fn run(cli: Cli) -> anyhow::Result<String> {
    let raw = if cli.conditions == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(SolrQueryError::Io)?;
        buf
    } else {
        cli.conditions
    };

    let document: serde_json::Value =
        serde_json::from_str(raw.trim()).map_err(SolrQueryError::Json)?;
    let conditions = json::conditions_from_json(&document)?;

    let options = Options {
        keyword_key: cli.keyword_key,
        keyword_boost: cli.keyword_boost,
        keyword_proximity: cli.keyword_proximity,
    };
    let query = builder::build(&conditions, &options);

    if cli.json {
        Ok(serde_json::to_string(&QueryOutput { query })?)
    } else {
        Ok(query)
    }
}
