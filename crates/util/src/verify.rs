//! On-chain verification of aggregate proofs.
//!
//! Proof, batch instances and aux data are decoded into 32-byte little-endian chunks, the
//! public input literals into their decimal values, and the lot is passed to the
//! `AggregatorVerifier` contract deployed for the image.

use std::future::Future;

use alloy_primitives::{Address, U256};
use alloy_provider::{DynProvider, PendingTransactionError, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionReceipt;
use num_bigint::BigUint;
use thiserror::Error;
use tracing::{debug, instrument};
use zkwasm_types::{Task, VerifyData, VerifyProofParams};

use crate::codec::{CodecError, bytes_to_bn, parse_args};

pub use abi::AggregatorVerifier;

#[allow(missing_docs)]
mod abi {
    alloy_sol_types::sol! {
        #[sol(rpc)]
        contract AggregatorVerifier {
            constructor(address[] _steps);

            function verify(
                uint256[] proof,
                uint256[] verify_instance,
                uint256[] aux,
                uint256[][] target_instance
            ) external view;
        }
    }
}

/// Argument list sent in place of empty public inputs.
pub const EMPTY_ARGS_PLACEHOLDER: &str = "0x0";

/// Something able to check an aggregate proof, usually a [`VerifierContract`].
pub trait ProofVerifier {
    /// Result of a successful verification.
    type Output;
    /// Verification error. Argument encoding failures convert into it.
    type Error: From<CodecError>;

    /// Calls `verify(proof, verify_instance, aux, target_instance)`.
    fn verify(
        &self,
        proof: Vec<U256>,
        verify_instance: Vec<U256>,
        aux: Vec<U256>,
        target_instance: Vec<Vec<U256>>,
    ) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

/// Errors of a [`VerifierContract`] call.
#[derive(Debug, Error)]
pub enum VerifyContractError {
    /// The arguments could not be encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The contract call failed.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    /// The transaction was sent but its receipt could not be obtained.
    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),
    /// A contract or sender address is not a 20-byte hex string.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] alloy_primitives::hex::FromHexError),
    /// The node URL does not parse.
    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(#[from] url::ParseError),
}

/// `AggregatorVerifier` bound to an address and a sender.
#[derive(Clone, Debug)]
pub struct VerifierContract<P> {
    instance: AggregatorVerifier::AggregatorVerifierInstance<P>,
    from: Address,
}

impl<P: Provider> VerifierContract<P> {
    /// Address of the verifier contract.
    pub fn address(&self) -> &Address {
        self.instance.address()
    }

    /// Sender of verification transactions.
    pub fn sender(&self) -> Address {
        self.from
    }
}

/// Binds the verifier interface to `verifier_address`, sending from `from_address`.
pub fn compose_verify_contract<P: Provider>(
    provider: P,
    verifier_address: Address,
    from_address: Address,
) -> VerifierContract<P> {
    VerifierContract {
        instance: AggregatorVerifier::new(verifier_address, provider),
        from: from_address,
    }
}

/// [`VerifierContract`] talking to a node over HTTP JSON-RPC.
pub type HttpVerifierContract = VerifierContract<DynProvider>;

/// Connects to the node at `rpc_url` and binds the verifier at `verifier_address`, sending
/// from `from_address`.
pub fn connect_verify_contract(
    rpc_url: &str,
    verifier_address: &str,
    from_address: &str,
) -> Result<HttpVerifierContract, VerifyContractError> {
    let verifier_address = verifier_address.parse::<Address>()?;
    let from_address = from_address.parse::<Address>()?;
    debug!(%rpc_url, %verifier_address, "connecting verifier contract");

    let provider = ProviderBuilder::new()
        .connect_http(rpc_url.parse()?)
        .erased();
    Ok(compose_verify_contract(provider, verifier_address, from_address))
}

impl<P: Provider> ProofVerifier for VerifierContract<P> {
    type Output = TransactionReceipt;
    type Error = VerifyContractError;

    async fn verify(
        &self,
        proof: Vec<U256>,
        verify_instance: Vec<U256>,
        aux: Vec<U256>,
        target_instance: Vec<Vec<U256>>,
    ) -> Result<TransactionReceipt, VerifyContractError> {
        let receipt = self
            .instance
            .verify(proof, verify_instance, aux, target_instance)
            .from(self.from)
            .send()
            .await?
            .get_receipt()
            .await?;
        Ok(receipt)
    }
}

/// Decimal values of the public input literals, or `["0x0"]` when there are none.
pub fn verify_args<S: AsRef<str>>(public_inputs: &[S]) -> Result<Vec<String>, CodecError> {
    let args: Vec<String> = parse_args(public_inputs)?
        .iter()
        .map(|arg| arg.to_str_radix(10))
        .collect();
    if args.is_empty() {
        return Ok(vec![EMPTY_ARGS_PLACEHOLDER.to_string()]);
    }
    Ok(args)
}

/// Verifies an aggregate proof through `verifier`.
///
/// Errors of the verifier are returned as they are.
#[instrument(skip_all)]
pub async fn verify_proof<V: ProofVerifier>(
    verifier: &V,
    params: &VerifyProofParams,
) -> Result<V::Output, V::Error> {
    let aggregate_proof = to_u256s(&bytes_to_bn(&params.aggregate_proof))?;
    let batch_instances = to_u256s(&bytes_to_bn(&params.batch_instances))?;
    let aux = to_u256s(&bytes_to_bn(&params.aux))?;

    let args = verify_args(&params.public_inputs)?;
    debug!(?args, "verify args");
    let args = args
        .iter()
        .map(|arg| {
            arg.parse::<U256>()
                .map_err(|_| CodecError::Overflow(arg.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    verifier
        .verify(aggregate_proof, batch_instances, aux, vec![args])
        .await
}

/// Decodes the proof material of a finished task.
pub fn compose_verify_data(task: &Task) -> Result<VerifyData, CodecError> {
    Ok(VerifyData {
        proof: bytes_to_bn(&task.proof),
        target_instances: parse_args(&task.public_inputs)?,
        aggregator_instances: bytes_to_bn(&task.instances),
        aux_instances: bytes_to_bn(&task.aux),
    })
}

fn to_u256s(chunks: &[BigUint]) -> Result<Vec<U256>, CodecError> {
    chunks
        .iter()
        .map(|chunk| {
            U256::try_from_le_slice(&chunk.to_bytes_le())
                .ok_or_else(|| CodecError::Overflow(chunk.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use alloy_primitives::{Address, U256};
    use alloy_provider::ProviderBuilder;
    use num_bigint::BigUint;
    use serde_json::json;
    use thiserror::Error;
    use zkwasm_types::{Task, VerifyProofParams};

    use crate::{
        codec::CodecError,
        verify::{
            ProofVerifier, VerifyContractError, compose_verify_contract, compose_verify_data,
            connect_verify_contract, verify_args, verify_proof,
        },
    };

    type VerifyCall = (Vec<U256>, Vec<U256>, Vec<U256>, Vec<Vec<U256>>);

    #[derive(Default)]
    struct MockVerifier {
        calls: Mutex<Vec<VerifyCall>>,
    }

    impl ProofVerifier for MockVerifier {
        type Output = usize;
        type Error = CodecError;

        async fn verify(
            &self,
            proof: Vec<U256>,
            verify_instance: Vec<U256>,
            aux: Vec<U256>,
            target_instance: Vec<Vec<U256>>,
        ) -> Result<usize, CodecError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((proof, verify_instance, aux, target_instance));
            Ok(calls.len())
        }
    }

    #[derive(Debug, Error, PartialEq)]
    enum RevertError {
        #[error("execution reverted")]
        Reverted,
        #[error(transparent)]
        Codec(#[from] CodecError),
    }

    struct RevertingVerifier;

    impl ProofVerifier for RevertingVerifier {
        type Output = ();
        type Error = RevertError;

        async fn verify(
            &self,
            _: Vec<U256>,
            _: Vec<U256>,
            _: Vec<U256>,
            _: Vec<Vec<U256>>,
        ) -> Result<(), RevertError> {
            Err(RevertError::Reverted)
        }
    }

    #[test]
    fn test_verify_args() {
        assert_eq!(verify_args::<&str>(&[]).unwrap(), vec!["0x0"]);
        assert_eq!(verify_args(&["", " "]).unwrap(), vec!["0x0"]);
        assert_eq!(
            verify_args(&["0xff:i64", "0x0000000000000001000a:bytes"]).unwrap(),
            vec!["255", "1", "10"]
        );
        assert!(verify_args(&["bad:i64"]).is_err());
    }

    #[tokio::test]
    async fn test_verify_proof_empty_inputs() {
        let verifier = MockVerifier::default();
        let params = VerifyProofParams::default();

        verify_proof(&verifier, &params).await.unwrap();

        let calls = verifier.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (proof, instances, aux, target) = &calls[0];
        assert!(proof.is_empty() && instances.is_empty() && aux.is_empty());
        assert_eq!(target, &vec![vec![U256::ZERO]]);
    }

    #[tokio::test]
    async fn test_verify_proof_chunks() {
        let mut aggregate_proof = vec![0u8; 64];
        aggregate_proof[0] = 7;
        aggregate_proof[32] = 1;
        aggregate_proof[33] = 1;
        let params = VerifyProofParams {
            aggregate_proof,
            batch_instances: vec![0xff; 32],
            aux: vec![2],
            public_inputs: vec!["3:i64".to_string(), "0x04:bytes".to_string()],
        };

        let verifier = MockVerifier::default();
        verify_proof(&verifier, &params).await.unwrap();

        let calls = verifier.calls.lock().unwrap();
        let (proof, instances, aux, target) = &calls[0];
        assert_eq!(proof, &vec![U256::from(7), U256::from(0x0101)]);
        assert_eq!(instances, &vec![U256::MAX]);
        assert_eq!(aux, &vec![U256::from(2)]);
        assert_eq!(target, &vec![vec![U256::from(3), U256::from(4)]]);
    }

    #[tokio::test]
    async fn test_verify_proof_invalid_inputs() {
        let params = VerifyProofParams {
            public_inputs: vec!["0xzz:i64".to_string()],
            ..Default::default()
        };
        let verifier = MockVerifier::default();
        assert!(matches!(
            verify_proof(&verifier, &params).await,
            Err(CodecError::InvalidArgs { .. })
        ));
        assert!(verifier.calls.lock().unwrap().is_empty());

        let too_big = (BigUint::from(1u8) << 256u32).to_string();
        let params = VerifyProofParams {
            public_inputs: vec![format!("{too_big}:i64")],
            ..Default::default()
        };
        assert_eq!(
            verify_proof(&verifier, &params).await,
            Err(CodecError::Overflow(too_big))
        );
    }

    #[tokio::test]
    async fn test_verify_proof_propagates_verifier_error() {
        let params = VerifyProofParams::default();
        assert_eq!(
            verify_proof(&RevertingVerifier, &params).await,
            Err(RevertError::Reverted)
        );
    }

    #[test]
    fn test_compose_verify_contract() {
        let provider =
            ProviderBuilder::new().connect_http("http://localhost:8545".parse().unwrap());
        let verifier = Address::repeat_byte(0x11);
        let from = Address::repeat_byte(0x22);

        let contract = compose_verify_contract(provider, verifier, from);
        assert_eq!(contract.address(), &verifier);
        assert_eq!(contract.sender(), from);
    }

    #[tokio::test]
    async fn test_connect_verify_contract() {
        let contract = connect_verify_contract(
            "http://localhost:8545",
            "0x1111111111111111111111111111111111111111",
            "0x2222222222222222222222222222222222222222",
        )
        .unwrap();
        assert_eq!(contract.address(), &Address::repeat_byte(0x11));
        assert_eq!(contract.sender(), Address::repeat_byte(0x22));

        assert!(matches!(
            connect_verify_contract("http://localhost:8545", "0x11", "0x22"),
            Err(VerifyContractError::InvalidAddress(_))
        ));
        assert!(matches!(
            connect_verify_contract(
                "not a url",
                "0x1111111111111111111111111111111111111111",
                "0x2222222222222222222222222222222222222222",
            ),
            Err(VerifyContractError::InvalidRpcUrl(_))
        ));
    }

    #[test]
    fn test_compose_verify_data() {
        let task: Task = serde_json::from_value(json!({
            "user_address": "0xabc",
            "md5": "ff",
            "task_type": "Prove",
            "status": "Done",
            "proof": [1, 0, 0],
            "aux": [3],
            "instances": [2],
            "public_inputs": ["9:i64"],
            "private_inputs": [],
            "_id": "1",
            "submit_time": "",
        }))
        .unwrap();

        let data = compose_verify_data(&task).unwrap();
        assert_eq!(data.proof, vec![BigUint::from(1u8)]);
        assert_eq!(data.aggregator_instances, vec![BigUint::from(2u8)]);
        assert_eq!(data.aux_instances, vec![BigUint::from(3u8)]);
        assert_eq!(data.target_instances, vec![BigUint::from(9u8)]);

        assert_eq!(
            VerifyProofParams::from(&task).public_inputs,
            vec!["9:i64".to_string()]
        );
    }
}
