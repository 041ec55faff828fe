use crate::Result;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_PORT: u16 = 3306;

/// Settings for the disposable MySQL server.
///
/// The defaults match what the `url_mappings` DDL expects: a server that
/// knows the `utf8mb4_0900_bin` collation and accepts packets large enough
/// for multi-megabyte URLs.
#[derive(Debug, Clone, TypedBuilder)]
pub struct MySqlConfig {
    #[builder(default = "hashlink".to_string(), setter(into))]
    database: String,
    #[builder(default = "hashlink".to_string(), setter(into))]
    username: String,
    #[builder(default = "hashlink".to_string(), setter(into))]
    password: String,
    #[builder(default = "8.4".to_string(), setter(into))]
    tag: String,
    #[builder(default = "64M".to_string(), setter(into))]
    max_allowed_packet: String,
}

impl MySqlConfig {
    fn server_args(&self) -> Vec<String> {
        vec![
            format!("--max-allowed-packet={}", self.max_allowed_packet),
            "--character-set-server=utf8mb4".to_string(),
        ]
    }

    /// Builds a sqlx-style DSN for this config at `host:port`.
    pub fn dsn(&self, host: &str, port: u16) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.username, self.password, host, port, self.database
        )
    }
}

/// A MySQL container that lives as long as this value.
pub struct MySqlServer {
    container: ContainerAsync<GenericImage>,
    config: MySqlConfig,
}

impl MySqlServer {
    /// Starts the container and waits for the real server, not the
    /// entrypoint's temporary one (which listens on port 0), to come up.
    pub async fn new(config: MySqlConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", config.tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr(format!("port: {MYSQL_PORT}")))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .with_cmd(config.server_args())
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub async fn database_url(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();
        let port = self.container.get_host_port_ipv4(MYSQL_PORT).await?;
        Ok(self.config.dsn(&host, port))
    }
}
