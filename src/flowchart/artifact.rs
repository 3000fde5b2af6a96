use super::definition::Flowchart;
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Current on-disk layout version.
pub const ARTIFACT_VERSION: u32 = 1;

/// A serialized flowchart definition.
///
/// Only the authored graph is stored. Run state (current node, variables, last response) is
/// stripped before encoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlowchartArtifact {
    pub version: u32,
    pub flowchart: Flowchart,
}

impl FlowchartArtifact {
    pub fn new(flowchart: &Flowchart) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            flowchart: flowchart.definition(),
        }
    }

    pub fn into_flowchart(self) -> Flowchart {
        self.flowchart
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard()).map_err(|e| ArtifactError::Encode(e.to_string()))
    }

    /// Deserializes an artifact from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let artifact: Self = decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact) // bincode 2 returns (data, bytes_read)
            .map_err(|e| ArtifactError::Decode(e.to_string()))?;
        if artifact.version != ARTIFACT_VERSION {
            return Err(ArtifactError::Decode(format!(
                "unsupported artifact version {}",
                artifact.version
            )));
        }
        Ok(artifact)
    }

    /// Saves the artifact to a file using the bincode format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        file.write_all(&bytes).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads an artifact from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let mut file = fs::File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|source| ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_bytes(&bytes)
    }
}
