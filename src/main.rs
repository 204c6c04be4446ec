use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> std::process::ExitCode {
    init_tracing();

    let cli = solr_query::cli::Cli::parse();
    match solr_query::cli::run(cli) {
        Ok(query) => {
            println!("{query}");
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(query_err) = err.downcast_ref::<solr_query::error::SolrQueryError>() {
                eprintln!("Error: {query_err}");
            } else {
                eprintln!("Error: {err}");
            }
            std::process::ExitCode::from(1)
        }
    }
}
