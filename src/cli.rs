use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "chat-relay",
    version,
    about = "Chat relay for Gemini with clock and weather tools"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bind address, e.g. 0.0.0.0:8080 (overrides config and PORT)
    #[arg(long)]
    pub addr: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "chat-relay",
            "--config",
            "custom.toml",
            "--addr",
            "127.0.0.1:3000",
        ]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert_eq!(cli.addr.as_deref(), Some("127.0.0.1:3000"));
    }

    #[test]
    fn defaults_to_config_values() {
        let cli = Cli::parse_from(["chat-relay"]);
        assert!(cli.config.is_none());
        assert!(cli.addr.is_none());
    }
}
