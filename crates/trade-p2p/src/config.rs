use {
    anyhow::{Context, Result},
    model::Pubkey,
    serde::Deserialize,
    serde_with::{DisplayFromStr, serde_as},
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_sdk::{commitment_config::CommitmentConfig, pubkey},
    std::{path::Path, time::Duration},
};

/// The deployed escrow program.
pub const PROGRAM_ID: Pubkey = pubkey!("EJV62xsWEZ5Kbzy7QNR8ogvDDQYqMkdN31UyCqkeaHDe");
/// Account collecting the protocol fee on order creation.
pub const FEE_ACCOUNT: Pubkey = pubkey!("DisXwVm1T6jdajyKX6FoMmSJ98CzCPcWWqUAJ3xUASc9");

#[serde_as]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Configuration {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_program_id")]
    pub program_id: Pubkey,

    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_fee_account")]
    pub fee_account: Pubkey,

    /// JSON RPC endpoint of the cluster node.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    #[serde(default)]
    pub commitment: Commitment,

    /// Timeout of a single RPC request.
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,

    #[serde(default)]
    pub logging: observe::Config,
}

/// How settled ledger state has to be before lookups observe it.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(value: Commitment) -> Self {
        match value {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

const fn default_program_id() -> Pubkey {
    PROGRAM_ID
}

const fn default_fee_account() -> Pubkey {
    FEE_ACCOUNT
}

fn default_node_url() -> String {
    "http://localhost:8899".to_string()
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            program_id: default_program_id(),
            fee_account: default_fee_account(),
            node_url: default_node_url(),
            commitment: Commitment::default(),
            request_timeout: default_request_timeout(),
            logging: observe::Config::default(),
        }
    }
}

impl Configuration {
    /// Reads the configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path:?}"))?;
        // Not printing the raw contents since they may hold private endpoints.
        toml::from_str(&data).with_context(|| format!("invalid config file {path:?}"))
    }

    pub fn rpc_client(&self) -> RpcClient {
        RpcClient::new_with_timeout_and_commitment(
            self.node_url.clone(),
            self.request_timeout,
            self.commitment.into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    #[test]
    fn empty_config_uses_defaults() {
        let config: Configuration = toml::from_str("").unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(
            config.program_id,
            Pubkey::from_str("EJV62xsWEZ5Kbzy7QNR8ogvDDQYqMkdN31UyCqkeaHDe").unwrap()
        );
        assert_eq!(config.commitment, Commitment::Confirmed);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
            program-id = "11111111111111111111111111111111"
            fee-account = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
            node-url = "https://api.devnet.solana.com"
            commitment = "finalized"
            request-timeout = "2s 500ms"

            [logging]
            env-filter = "trade_p2p=trace"
            json = true
        "#;
        let config: Configuration = toml::from_str(toml).unwrap();
        assert_eq!(config.program_id, Pubkey::default());
        assert_eq!(config.fee_account, spl_token::ID);
        assert_eq!(config.node_url, "https://api.devnet.solana.com");
        assert_eq!(config.commitment, Commitment::Finalized);
        assert_eq!(config.request_timeout, Duration::from_millis(2_500));
        assert_eq!(config.logging.env_filter, "trade_p2p=trace");
        assert!(config.logging.json);
        assert_eq!(
            CommitmentConfig::from(config.commitment),
            CommitmentConfig::finalized()
        );
    }

    #[test]
    fn rejects_unknown_fields_and_bad_keys() {
        assert!(toml::from_str::<Configuration>("node = \"http://localhost\"").is_err());
        assert!(toml::from_str::<Configuration>("program-id = \"not a key\"").is_err());
        assert!(toml::from_str::<Configuration>("commitment = \"recent\"").is_err());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = Configuration::from_path(Path::new("/does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("/does/not/exist.toml"));
    }
}
