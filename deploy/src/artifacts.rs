use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use ethers::{abi::Abi, types::Bytes, utils::hex};
use serde::Deserialize;

const BUILD_INFO_DIR: &str = "build-info";
const LINK_PLACEHOLDER: &str = "__$";

/// A compiled contract as written by Hardhat under `artifacts/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: Abi,
    pub bytecode: String,
}

impl Artifact {
    /// Finds the artifact for `name`, either a bare contract name or a fully
    /// qualified `contracts/Foo.sol:Foo`.
    pub fn find(root: &Path, name: &str) -> Result<Self> {
        let (source, contract) = match name.rsplit_once(':') {
            Some((source, contract)) => (Some(source), contract),
            None => (None, name),
        };

        let mut candidates = Vec::new();
        collect(root, &format!("{}.json", contract), &mut candidates)
            .with_context(|| format!("failed to read artifacts from {}", root.display()))?;

        let mut matches = Vec::new();
        for path in candidates {
            let artifact = Self::load(&path)?;
            if artifact.contract_name != contract {
                continue;
            }
            if source.is_some_and(|source| source != artifact.source_name) {
                continue;
            }
            matches.push(artifact);
        }

        match matches.len() {
            0 => Err(anyhow!("artifact for contract {} not found", name)),
            1 => Ok(matches.remove(0)),
            _ => {
                let names: Vec<String> = matches
                    .iter()
                    .map(|a| format!("{}:{}", a.source_name, a.contract_name))
                    .collect();
                Err(anyhow!(
                    "multiple artifacts for contract {}, use a fully qualified name: {}",
                    name,
                    names.join(", ")
                ))
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("malformed artifact {}", path.display()))
    }

    /// Creation bytecode, rejecting contracts that cannot be deployed as is.
    pub fn deployable_bytecode(&self) -> Result<Bytes> {
        let code = self.bytecode.strip_prefix("0x").unwrap_or(&self.bytecode);
        if code.is_empty() {
            bail!(
                "contract {} is abstract or an interface and cannot be deployed",
                self.contract_name
            );
        }
        if code.contains(LINK_PLACEHOLDER) {
            bail!(
                "contract {} has unlinked library references",
                self.contract_name
            );
        }
        Ok(hex::decode(code)?.into())
    }
}

fn collect(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if path.file_name().is_some_and(|n| n == BUILD_INFO_DIR) {
                continue;
            }
            collect(&path, file_name, found)?;
        } else if path.file_name().is_some_and(|n| n == file_name) {
            found.push(path);
        }
    }
    Ok(())
}
