use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Send a single prompt and print the stored interaction as JSON
    Chat {
        prompt: String,

        #[arg(short, long)]
        user_id: String,
    },
}
