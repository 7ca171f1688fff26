//! Client configuration and TOML/YAML parsing.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use zkwasm_util::verify::{HttpVerifierContract, VerifyContractError, connect_verify_contract};

/// Client configuration loaded from a TOML/YAML file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the zkWasm service.
    pub endpoint: String,
    /// Name of the user.
    #[serde(default)]
    pub username: String,
    /// Address of the user, used as owner of submitted tasks and images.
    #[serde(default)]
    pub user_address: String,
    /// Verifier contract used for on-chain proof verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier: Option<VerifierConfig>,
}

/// Location of an `AggregatorVerifier` contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// JSON-RPC URL of the chain node.
    pub rpc_url: String,
    /// Address of the verifier contract.
    pub address: String,
    /// Sender of verification transactions.
    pub from: String,
}

impl VerifierConfig {
    /// Connects to the configured contract.
    pub fn connect(&self) -> Result<HttpVerifierContract, VerifyContractError> {
        connect_verify_contract(&self.rpc_url, &self.address, &self.from)
    }
}

impl ClientConfig {
    /// Reads a `.toml`, `.yaml` or `.yml` client config.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {path:?}"))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml_str(&string),
            Some("yaml" | "yml") => Self::from_yaml_str(&string),
            Some(ext) => anyhow::bail!("Unsupported config format: .{ext}"),
            None => anyhow::bail!("Config file must have an extension (e.g., .toml)"),
        }
    }

    /// Parses a TOML client config.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml_edit::de::from_str(s)
            .with_context(|| format!("Failed to deserialize TOML config:\n{s}"))
    }

    /// Renders the config as TOML, the format [`ClientConfig::load`] reads back.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }

    /// Parses a YAML client config.
    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(s).with_context(|| format!("Failed to deserialize YAML config:\n{s}"))
    }
}

#[cfg(test)]
mod test {
    use zkwasm_util::verify::VerifyContractError;

    use crate::{ClientConfig, VerifierConfig};

    #[test]
    fn test_from_toml_str() {
        let toml = r#"
            endpoint = "http://localhost:8080"
            username = "alice"
            user_address = "0x1111111111111111111111111111111111111111"

            [verifier]
            rpc_url = "http://localhost:8545"
            address = "0x2222222222222222222222222222222222222222"
            from = "0x1111111111111111111111111111111111111111"
        "#;
        assert_eq!(ClientConfig::from_toml_str(toml).unwrap(), sample_config());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
            endpoint: http://localhost:8080
            username: alice
            user_address: "0x1111111111111111111111111111111111111111"
            verifier:
              rpc_url: http://localhost:8545
              address: "0x2222222222222222222222222222222222222222"
              from: "0x1111111111111111111111111111111111111111"
        "#;
        assert_eq!(ClientConfig::from_yaml_str(yaml).unwrap(), sample_config());
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_toml_str(r#"endpoint = "http://localhost:8080""#).unwrap();
        assert_eq!(config.username, "");
        assert_eq!(config.user_address, "");
        assert_eq!(config.verifier, None);

        assert!(ClientConfig::from_toml_str("username = \"alice\"").is_err());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = sample_config();
        let toml = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml_str(&toml).unwrap(), config);
    }

    #[tokio::test]
    async fn test_verifier_connect() {
        let verifier = sample_config().verifier.unwrap();
        let contract = verifier.connect().unwrap();
        assert_eq!(contract.address().to_string(), verifier.address);
        assert_eq!(contract.sender().to_string(), verifier.from);

        let invalid = VerifierConfig {
            address: "not an address".to_string(),
            ..verifier
        };
        assert!(matches!(
            invalid.connect(),
            Err(VerifyContractError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_load() {
        let dir = std::env::temp_dir().join(format!("zkwasm-client-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("client.toml");
        std::fs::write(&path, sample_config().to_toml().unwrap()).unwrap();
        assert_eq!(ClientConfig::load(&path).unwrap(), sample_config());

        let path = dir.join("client.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(ClientConfig::load(&path).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    fn sample_config() -> ClientConfig {
        ClientConfig {
            endpoint: "http://localhost:8080".to_string(),
            username: "alice".to_string(),
            user_address: "0x1111111111111111111111111111111111111111".to_string(),
            verifier: Some(VerifierConfig {
                rpc_url: "http://localhost:8545".to_string(),
                address: "0x2222222222222222222222222222222222222222".to_string(),
                from: "0x1111111111111111111111111111111111111111".to_string(),
            }),
        }
    }
}
