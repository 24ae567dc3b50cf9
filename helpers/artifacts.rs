//! Compiled contract artifacts.

use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Directory of compiled artifacts: `<dir>/<Name>.json` and `<dir>/build-info/<Name>.json`.
#[derive(Debug, Clone)]
pub struct Artifacts {
    dir: PathBuf,
}

/// Creation bytecode of one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytecode: Bytes,
}

/// Compiler input needed to verify a contract's source.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInfo {
    /// e.g. `0.8.7+commit.e28d00a7`
    pub solc_long_version: String,
    /// solc standard JSON input.
    pub input: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(Bytes),
    Object { object: Bytes },
}

#[derive(Deserialize)]
struct RawArtifact {
    bytecode: RawBytecode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuildInfo {
    solc_long_version: String,
    input: Value,
}

impl Artifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads `<dir>/<name>.json`. Accepts both `"bytecode": "0x.."` and
    /// `"bytecode": { "object": "0x.." }`.
    pub fn load(&self, name: &str) -> Result<Artifact> {
        let path = self.dir.join(format!("{name}.json"));
        let raw: RawArtifact = read_json(name, &path)?;
        let bytecode = match raw.bytecode {
            RawBytecode::Hex(bytes) | RawBytecode::Object { object: bytes } => bytes,
        };
        if bytecode.is_empty() {
            return Err(Error::Artifact {
                contract: name.to_string(),
                reason: "bytecode is empty (abstract contract or interface?)".into(),
            });
        }
        Ok(Artifact { bytecode })
    }

    pub fn build_info(&self, name: &str) -> Result<BuildInfo> {
        let path = self.dir.join("build-info").join(format!("{name}.json"));
        let raw: RawBuildInfo = read_json(name, &path)?;
        Ok(BuildInfo {
            solc_long_version: raw.solc_long_version,
            input: raw.input,
        })
    }
}

impl BuildInfo {
    /// Fully qualified name (`contracts/RandomNFT.sol:RandomNFT`) of the
    /// source file declaring `name`.
    pub fn qualified_name(&self, name: &str) -> Option<String> {
        let sources = self.input.get("sources")?.as_object()?;
        sources
            .keys()
            .find(|path| {
                Path::new(path.as_str())
                    .file_stem()
                    .is_some_and(|stem| stem == name)
            })
            .map(|path| format!("{path}:{name}"))
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(contract: &str, path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::Artifact {
        contract: contract.to_string(),
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    serde_json::from_str(&raw).map_err(|e| Error::Artifact {
        contract: contract.to_string(),
        reason: format!("malformed {}: {e}", path.display()),
    })
}
