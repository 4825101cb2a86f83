//! Server configuration.
//!
//! Every flag can also be set through its environment variable; a `.env` file
//! in the working directory is loaded first.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "orderbot-server")]
#[command(about = "Webhook fulfillment backend for the food-ordering assistant")]
pub struct ServerArgs {
    /// Listen address
    #[arg(long = "bind", env = "ORDERBOT_BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: String,

    /// Postgres connection string. Without it orders are kept in memory.
    #[arg(long, env = "ORDERBOT_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Connection pool size
    #[arg(long, env = "ORDERBOT_DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = ServerArgs::try_parse_from(["orderbot-server"]).unwrap();
        assert_eq!(args.max_connections, 5);
    }

    #[test]
    fn test_flags() {
        let args = ServerArgs::try_parse_from([
            "orderbot-server",
            "--bind",
            "127.0.0.1:9000",
            "--database-url",
            "postgresql:///orders",
            "--max-connections",
            "2",
        ])
        .unwrap();
        assert_eq!(args.bind_addr, "127.0.0.1:9000");
        assert_eq!(args.database_url.as_deref(), Some("postgresql:///orders"));
        assert_eq!(args.max_connections, 2);
    }
}
