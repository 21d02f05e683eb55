//! Local harness commands behind the `simpleapp` binary
//!
//! Each command loads the world state, runs one invocation against a
//! `MemoryStub` and saves the state back only if the contract succeeded.

use crate::chaincode::SimpleChaincode;
use crate::config::AppConfig;
use crate::world_state::WorldStateFile;
use anyhow::Context;
use simpleapp_identity::enroll::enroll as enroll_identity;
use simpleapp_identity::serialize_identity;
use simpleapp_shim::{MemoryStub, Response};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Runs the contract against a world state file as one caller
#[derive(Debug, Clone)]
pub struct Harness {
    pub state: WorldStateFile,
    pub msp_id: String,
    pub cert_path: Option<PathBuf>,
}

impl Harness {
    pub fn new(
        state: WorldStateFile,
        msp_id: impl Into<String>,
        cert_path: Option<PathBuf>,
    ) -> Self {
        Self {
            state,
            msp_id: msp_id.into(),
            cert_path,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            WorldStateFile::new(&config.state.path),
            config.identity.msp_id.clone(),
            config.identity.cert_path.clone(),
        )
    }

    /// Run `init` as the configured caller
    pub fn init(&self) -> anyhow::Result<()> {
        let creator = self.creator()?;
        let mut stub = self.state.load()?;

        let response = stub.mock_init(&SimpleChaincode, &creator, Vec::new());
        self.conclude(&stub, response).map(|_| ())
    }

    /// Run `invoke` and return the payload
    pub fn invoke(&self, function: &str, args: Vec<String>) -> anyhow::Result<Option<Vec<u8>>> {
        let creator = self.creator()?;
        let mut stub = self.state.load()?;

        let response = stub.mock_invoke(&SimpleChaincode, &creator, function, args);
        self.conclude(&stub, response)
    }

    /// Committed world state, values undecoded
    pub fn dump(&self) -> anyhow::Result<BTreeMap<String, Vec<u8>>> {
        Ok(self.state.load()?.into_state())
    }

    fn creator(&self) -> anyhow::Result<Vec<u8>> {
        let path = self
            .cert_path
            .as_ref()
            .context("No caller certificate; pass --cert or set identity.cert_path")?;
        let pem = fs::read(path)
            .with_context(|| format!("Failed to read certificate {}", path.display()))?;
        Ok(serialize_identity(&self.msp_id, &pem))
    }

    fn conclude(
        &self,
        stub: &MemoryStub,
        response: Response,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        match response {
            Response::Success { payload } => {
                self.state.save(stub)?;
                Ok(payload)
            }
            Response::Error { message } => anyhow::bail!(message),
        }
    }
}

/// Self-sign a certificate for `common_name` and write it (and its key) out
pub fn enroll(common_name: &str, out: &Path, key_out: Option<&Path>) -> anyhow::Result<()> {
    let enrolled = enroll_identity(common_name)?;

    fs::write(out, &enrolled.cert_pem)
        .with_context(|| format!("Failed to write certificate {}", out.display()))?;
    if let Some(key_out) = key_out {
        fs::write(key_out, &enrolled.key_pem)
            .with_context(|| format!("Failed to write key {}", key_out.display()))?;
    }

    tracing::info!(common_name, cert = %out.display(), "Identity enrolled");
    Ok(())
}
