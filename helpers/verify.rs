//! Source verification against an Etherscan-compatible block explorer.

use std::time::Duration;

use alloy::{
    hex,
    primitives::{Address, Bytes},
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    artifacts::Artifacts,
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
}

/// Submits a deployed contract's source so the explorer can match it to the bytecode.
#[allow(async_fn_in_trait)]
pub trait SourceVerifier {
    async fn verify(
        &self,
        contract: &str,
        address: Address,
        constructor_args: &Bytes,
    ) -> Result<VerificationOutcome>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Submission {
    Queued(String),
    Done(VerificationOutcome),
}

#[derive(Debug, PartialEq, Eq)]
enum Status {
    Pending,
    Done(VerificationOutcome),
}

fn is_already_verified(result: &str) -> bool {
    result.to_ascii_lowercase().contains("already verified")
}

fn classify_submission(response: ApiResponse) -> Result<Submission> {
    if response.status == "1" {
        return Ok(Submission::Queued(response.result));
    }
    if is_already_verified(&response.result) {
        return Ok(Submission::Done(VerificationOutcome::AlreadyVerified));
    }
    Err(Error::Verification(format!(
        "{}: {}",
        response.message, response.result
    )))
}

fn classify_status(response: ApiResponse) -> Result<Status> {
    if response.result.starts_with("Pending") {
        return Ok(Status::Pending);
    }
    if is_already_verified(&response.result) {
        return Ok(Status::Done(VerificationOutcome::AlreadyVerified));
    }
    if response.status == "1" {
        return Ok(Status::Done(VerificationOutcome::Verified));
    }
    Err(Error::Verification(response.result))
}

/// [`SourceVerifier`] backed by the Etherscan v2 API.
#[derive(Debug, Clone)]
pub struct EtherscanVerifier {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    chain_id: u64,
    artifacts: Artifacts,
    poll_interval: Duration,
    max_polls: u32,
}

impl EtherscanVerifier {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        chain_id: u64,
        artifacts: Artifacts,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            chain_id,
            artifacts,
            poll_interval: Duration::from_secs(3),
            max_polls: 10,
        }
    }

    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls.max(1);
        self
    }

    async fn submit(
        &self,
        contract: &str,
        address: Address,
        constructor_args: &Bytes,
    ) -> Result<Submission> {
        let build_info = self.artifacts.build_info(contract)?;
        let qualified_name =
            build_info
                .qualified_name(contract)
                .ok_or_else(|| Error::Artifact {
                    contract: contract.to_string(),
                    reason: "no source file in build info declares it".into(),
                })?;

        let form = [
            ("apikey", self.api_key.clone()),
            ("module", "contract".into()),
            ("action", "verifysourcecode".into()),
            ("contractaddress", address.to_string()),
            ("sourceCode", serde_json::to_string(&build_info.input)?),
            ("codeformat", "solidity-standard-json-input".into()),
            ("contractname", qualified_name),
            ("compilerversion", format!("v{}", build_info.solc_long_version)),
            // Etherscan's spelling.
            ("constructorArguements", hex::encode(constructor_args)),
        ];

        let response: ApiResponse = self
            .http
            .post(&self.api_url)
            .query(&[("chainid", self.chain_id)])
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(status = %response.status, result = %response.result, "Verification submitted");
        classify_submission(response)
    }

    async fn check(&self, guid: &str) -> Result<Status> {
        let response: ApiResponse = self
            .http
            .get(&self.api_url)
            .query(&[
                ("chainid", self.chain_id.to_string().as_str()),
                ("apikey", self.api_key.as_str()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        classify_status(response)
    }
}

impl SourceVerifier for EtherscanVerifier {
    async fn verify(
        &self,
        contract: &str,
        address: Address,
        constructor_args: &Bytes,
    ) -> Result<VerificationOutcome> {
        let guid = match self.submit(contract, address, constructor_args).await? {
            Submission::Done(outcome) => return Ok(outcome),
            Submission::Queued(guid) => guid,
        };
        info!(%guid, "Verification queued");

        for _ in 0..self.max_polls {
            tokio::time::sleep(self.poll_interval).await;
            if let Status::Done(outcome) = self.check(&guid).await? {
                return Ok(outcome);
            }
        }
        Err(Error::Verification(format!(
            "still pending after {} checks (guid {guid})",
            self.max_polls
        )))
    }
}
